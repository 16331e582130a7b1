//! Chronicle — Demo CLI
//!
//! Runs one or all of the change-tracking demo scenarios. Each scenario
//! wires a real `ChangeRecorder` to the in-memory change store, mutates a
//! sample record, and prints the rows that land in the audit trail.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- profile-update
//!   cargo run -p demo -- secret-rotation
//!   cargo run -p demo -- scoped-audit
//!   cargo run -p demo -- lifecycle

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use chronicle_contracts::{
    change::ChangeRecord,
    error::ChronicleResult,
    record::{ActorId, RecordId},
};
use chronicle_core::{traits::Trackable, ChangeRecorder};
use chronicle_store::{query, InMemoryChangeStore};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Chronicle — attribute-level change tracking demo.
///
/// Each subcommand mutates a sample user profile and shows which rows the
/// engine emits: per-attribute diffs for updates, redaction for sensitive
/// fields, allow/deny filtering, and change-set grouping.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Chronicle change-tracking demo",
    long_about = "Runs Chronicle demo scenarios showing attribute diffing,\n\
                  sensitive-field redaction, allow/deny filtering, and\n\
                  change-set correlation."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all scenarios in sequence.
    RunAll,
    /// Scenario 1: Profile Update (one change set, one row per attribute).
    ProfileUpdate,
    /// Scenario 2: Secret Rotation (sensitive values are redacted).
    SecretRotation,
    /// Scenario 3: Scoped Audit (allow/deny lists restrict logging).
    ScopedAudit,
    /// Scenario 4: Full Lifecycle (create, update, delete, restore).
    Lifecycle,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::ProfileUpdate => profile_update(),
        Command::SecretRotation => secret_rotation(),
        Command::ScopedAudit => scoped_audit(),
        Command::Lifecycle => lifecycle(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> ChronicleResult<()> {
    profile_update()?;
    secret_rotation()?;
    scoped_audit()?;
    lifecycle()?;
    Ok(())
}

// ── Sample record ─────────────────────────────────────────────────────────────

/// A user profile whose mutations the scenarios track.
struct UserProfile {
    id: String,
    attributes: BTreeMap<String, Value>,
    original: BTreeMap<String, Value>,
    allow: BTreeSet<String>,
    deny: BTreeSet<String>,
    sensitive: BTreeSet<String>,
}

impl UserProfile {
    /// A profile whose original snapshot equals its current state.
    fn seeded(id: &str, values: &[(&str, Value)]) -> Self {
        let snapshot: BTreeMap<String, Value> = values
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Self {
            id: id.to_string(),
            attributes: snapshot.clone(),
            original: snapshot,
            allow: BTreeSet::new(),
            deny: BTreeSet::new(),
            sensitive: BTreeSet::new(),
        }
    }

    /// Mutate one attribute, leaving the original snapshot untouched.
    fn set(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }
}

impl Trackable for UserProfile {
    fn record_id(&self) -> RecordId {
        RecordId::new(self.id.clone())
    }

    fn record_type(&self) -> &str {
        "user"
    }

    fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    fn original(&self) -> &BTreeMap<String, Value> {
        &self.original
    }

    fn loggable_attributes(&self) -> BTreeSet<String> {
        self.allow.clone()
    }

    fn unloggable_attributes(&self) -> BTreeSet<String> {
        self.deny.clone()
    }

    fn sensitive_attributes(&self) -> BTreeSet<String> {
        self.sensitive.clone()
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn profile_update() -> ChronicleResult<()> {
    print_heading("Scenario 1: Profile Update");

    let store = Arc::new(InMemoryChangeStore::new());
    let recorder = ChangeRecorder::new(ActorId::new("admin-1"), store.clone());

    let mut profile = UserProfile::seeded(
        "42",
        &[("name", json!("Ada")), ("email", json!("ada@example.com"))],
    );
    profile.set("name", json!("Ada L."));
    profile.set("email", json!("ada.l@example.com"));

    let rows = recorder.updated(&profile)?;
    println!(
        "Two attributes changed -> {} rows, one change set:",
        rows.len()
    );
    print_rows(&rows);

    Ok(())
}

fn secret_rotation() -> ChronicleResult<()> {
    print_heading("Scenario 2: Secret Rotation");

    let store = Arc::new(InMemoryChangeStore::new());
    let recorder = ChangeRecorder::new(ActorId::new("admin-1"), store.clone());

    let mut profile = UserProfile::seeded(
        "42",
        &[("email", json!("ada@example.com")), ("password", json!("hunter2"))],
    );
    profile.sensitive.insert("password".to_string());
    profile.set("email", json!("ada.l@example.com"));
    profile.set("password", json!("correct-horse"));

    let rows = recorder.updated(&profile)?;
    println!("The password row carries the redaction sentinel, never the value:");
    print_rows(&rows);

    Ok(())
}

fn scoped_audit() -> ChronicleResult<()> {
    print_heading("Scenario 3: Scoped Audit");

    let store = Arc::new(InMemoryChangeStore::new());
    let recorder = ChangeRecorder::new(ActorId::new("admin-1"), store.clone());

    let mut profile = UserProfile::seeded(
        "42",
        &[
            ("name", json!("Ada")),
            ("email", json!("ada@example.com")),
            ("login_count", json!(17)),
        ],
    );
    profile.allow = ["name", "email"].iter().map(|s| s.to_string()).collect();
    profile.deny.insert("email".to_string());
    profile.set("name", json!("Ada L."));
    profile.set("email", json!("ada.l@example.com"));
    profile.set("login_count", json!(18));

    let rows = recorder.updated(&profile)?;
    println!("Allow-list {{name, email}} plus deny-list {{email}} -> only 'name' is logged:");
    print_rows(&rows);

    Ok(())
}

fn lifecycle() -> ChronicleResult<()> {
    print_heading("Scenario 4: Full Lifecycle");

    let store = Arc::new(InMemoryChangeStore::new());
    let recorder = ChangeRecorder::new(ActorId::new("admin-1"), store.clone());

    let mut profile = UserProfile::seeded("42", &[("name", json!("Ada"))]);

    recorder.created(&profile)?;
    profile.set("name", json!("Ada L."));
    recorder.updated(&profile)?;
    recorder.deleted(&profile)?;
    recorder.restored(&profile)?;

    let rows = store.rows();
    println!("Each lifecycle event forms its own change set:");
    for (set, group) in query::grouped_by_set(&rows) {
        let kinds: Vec<&str> = group.iter().map(|row| row.record.kind.as_str()).collect();
        println!("  set {} -> {} row(s) [{}]", set, group.len(), kinds.join(", "));
    }

    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_rows(rows: &[ChangeRecord]) {
    for row in rows {
        println!(
            "  [{}] {}: {} -> {}",
            row.change_set.as_deref().unwrap_or("-"),
            row.attribute.as_deref().unwrap_or("-"),
            row.old_value.as_deref().unwrap_or("(none)"),
            row.new_value.as_deref().unwrap_or("(none)"),
        );
    }
    println!();
}

fn print_heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
}

fn print_banner() {
    println!();
    println!("Chronicle — Attribute-Level Change Tracking");
    println!("===========================================");
    println!();
    println!("Engine pipeline per lifecycle event:");
    println!("  [1] Changed attributes filtered (allow-list, deny-list, timestamps)");
    println!("  [2] Per-attribute diffs extracted, sensitive values redacted");
    println!("  [3] One change-set identifier issued per mutation event");
    println!("  [4] One immutable row appended per diff (or per lifecycle event)");
    println!();
}
