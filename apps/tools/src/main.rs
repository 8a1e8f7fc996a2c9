use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use editor_core::{
    ConfirmPrompt, EditorIntent, EditorView, IntentOutcome, ItemHandle, ListEditorController,
};
use shared::{Pressure, PressureDocument};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pressure_tools", about = "Inspect and edit a pressure document")]
struct Cli {
    #[arg(long, env = "PRESSURE_STUDIO_DOCUMENT", default_value = "pressures.json")]
    document: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every pressure in order.
    List,
    /// Print one pressure as JSON.
    Show { selector: String },
    /// Append a new pressure, optionally overriding the defaults.
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_finite)]
        initial_value: Option<f64>,
        #[arg(long, value_parser = parse_finite)]
        decay: Option<f64>,
    },
    Rename {
        selector: String,
        name: String,
    },
    Set {
        selector: String,
        #[arg(long, value_parser = parse_finite)]
        initial_value: Option<f64>,
        #[arg(long, value_parser = parse_finite)]
        decay: Option<f64>,
    },
    Delete {
        selector: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// JSON has no encoding for NaN or infinities, so they never reach the document.
fn parse_finite(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite number"))
    }
}

/// Field overrides applied through an edit after the pressure is resolved.
#[derive(Debug, Default)]
struct FieldChanges {
    name: Option<String>,
    initial_value: Option<f64>,
    decay: Option<f64>,
}

impl FieldChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.initial_value.is_none() && self.decay.is_none()
    }

    fn apply_to(&self, pressure: &Pressure) -> Pressure {
        let mut updated = pressure.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(v) = self.initial_value {
            updated.initial_value = v;
        }
        if let Some(v) = self.decay {
            updated.decay = v;
        }
        updated
    }
}

/// Asks on the terminal; anything but `y`/`yes` declines.
struct TerminalConfirm;

impl ConfirmPrompt for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => parse_answer(&line),
            Err(_) => false,
        }
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// A document file plus the editor driving it. Writes back only when the
/// editor emitted a replacement collection.
struct Session {
    path: PathBuf,
    document: PressureDocument,
    editor: ListEditorController,
    changed: bool,
}

impl Session {
    fn open(path: &Path) -> Result<Self> {
        let document = PressureDocument::load_or_default(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            pressures = document.pressures.len(),
            "opened pressure document"
        );
        Ok(Self {
            path: path.to_path_buf(),
            document,
            editor: ListEditorController::new(),
            changed: false,
        })
    }

    fn view(&self) -> EditorView<'_> {
        self.editor.render(
            &self.document.pressures,
            &self.document.schema,
            &self.document.usage_map,
        )
    }

    /// Id match first, then a numeric index.
    fn select(&self, selector: &str) -> Result<(ItemHandle, Pressure)> {
        let view = self.view();
        let item = view
            .items()
            .iter()
            .find(|item| item.pressure.id.as_str() == selector)
            .or_else(|| selector.parse::<usize>().ok().and_then(|i| view.item(i)))
            .ok_or_else(|| anyhow!("no pressure matches '{selector}'"))?;
        Ok((item.handle.clone(), item.pressure.clone()))
    }

    fn apply(
        &mut self,
        intent: EditorIntent,
        confirm: &mut impl ConfirmPrompt,
    ) -> Result<IntentOutcome> {
        let mut emitted = None;
        let outcome = self.editor.dispatch(
            intent,
            &self.document.pressures,
            confirm,
            &mut |next: Vec<Pressure>| emitted = Some(next),
        )?;

        if let Some(next) = emitted {
            self.document.replace_pressures(next);
            self.changed = true;
        }
        Ok(outcome)
    }

    fn edit(&mut self, selector: &str, changes: &FieldChanges) -> Result<Pressure> {
        let (handle, current) = self.select(selector)?;
        let updated = changes.apply_to(&current);
        self.apply(
            EditorIntent::Edit {
                handle,
                updated: updated.clone(),
            },
            &mut refuse,
        )?;
        Ok(updated)
    }

    fn finish(self) -> Result<()> {
        if self.changed {
            self.document
                .save(&self.path)
                .with_context(|| format!("failed to write {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Edits and adds never prompt; used where a confirmation would be a bug.
fn refuse(_: &str) -> bool {
    false
}

fn accept(_: &str) -> bool {
    true
}

fn run(cli: Cli, confirm: &mut impl ConfirmPrompt) -> Result<()> {
    let mut session = Session::open(&cli.document)?;

    match cli.command {
        Command::List => {
            let view = session.view();
            if view.is_empty() {
                println!("no pressures in {}", cli.document.display());
            }
            for item in view.items() {
                let p = item.pressure;
                println!(
                    "{:>3}  {:<40}  {:<24}  initial={:<8} decay={:<6} +{} -{}  used_by={}",
                    item.handle.index(),
                    p.id,
                    p.name,
                    p.initial_value,
                    p.decay,
                    p.growth.positive_feedback.len(),
                    p.growth.negative_feedback.len(),
                    item.usages().len()
                );
            }
        }
        Command::Show { selector } => {
            let (_, pressure) = session.select(&selector)?;
            println!("{}", serde_json::to_string_pretty(&pressure)?);
        }
        Command::Add {
            name,
            initial_value,
            decay,
        } => {
            let IntentOutcome::Added(id) = session.apply(EditorIntent::Add, &mut refuse)? else {
                return Err(anyhow!("add did not produce a pressure"));
            };
            let changes = FieldChanges {
                name,
                initial_value,
                decay,
            };
            if !changes.is_empty() {
                session.edit(id.as_str(), &changes)?;
            }
            println!("created pressure_id={id}");
        }
        Command::Rename { selector, name } => {
            let updated = session.edit(
                &selector,
                &FieldChanges {
                    name: Some(name),
                    ..FieldChanges::default()
                },
            )?;
            println!("renamed pressure_id={} to \"{}\"", updated.id, updated.name);
        }
        Command::Set {
            selector,
            initial_value,
            decay,
        } => {
            let changes = FieldChanges {
                name: None,
                initial_value,
                decay,
            };
            if changes.is_empty() {
                return Err(anyhow!("nothing to set; pass --initial-value and/or --decay"));
            }
            let updated = session.edit(&selector, &changes)?;
            println!(
                "updated pressure_id={} initial={} decay={}",
                updated.id, updated.initial_value, updated.decay
            );
        }
        Command::Delete { selector, yes } => {
            let (handle, _) = session.select(&selector)?;
            let intent = EditorIntent::Delete { handle };
            let outcome = if yes {
                session.apply(intent, &mut accept)?
            } else {
                session.apply(intent, confirm)?
            };
            match outcome {
                IntentOutcome::Deleted(removed) => {
                    println!("deleted pressure_id={} (\"{}\")", removed.id, removed.name)
                }
                _ => println!("kept pressure; nothing deleted"),
            }
        }
    }

    session.finish()
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    run(Cli::parse(), &mut TerminalConfirm)
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_document(label: &str) -> (PathBuf, PathBuf) {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = env::temp_dir().join(format!("pressure_tools_{label}_{suffix}"));
        let path = root.join("pressures.json");
        (root, path)
    }

    fn cli(path: &Path, args: &[&str]) -> Cli {
        let path = path.to_string_lossy().to_string();
        let mut argv = vec!["pressure_tools", "--document", path.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn answers_accept_only_yes() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("nope"));
    }

    #[test]
    fn add_with_overrides_writes_the_document() {
        let (root, path) = temp_document("add");

        run(
            cli(&path, &["add", "--name", "Unrest", "--decay", "2.5"]),
            &mut refuse,
        )
        .expect("add");

        let document = PressureDocument::load(&path).expect("reload");
        assert_eq!(document.pressures.len(), 1);
        assert_eq!(document.pressures[0].name, "Unrest");
        assert_eq!(document.pressures[0].decay, 2.5);
        assert_eq!(document.pressures[0].initial_value, 50.0);

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn selectors_match_ids_before_indices() {
        let (root, path) = temp_document("select");
        run(cli(&path, &["add", "--name", "First"]), &mut refuse).expect("add first");
        run(cli(&path, &["add", "--name", "Second"]), &mut refuse).expect("add second");

        let session = Session::open(&path).expect("open");
        let (handle, pressure) = session.select("1").expect("by index");
        assert_eq!(handle.index(), 1);
        assert_eq!(pressure.name, "Second");

        let first_id = session.document.pressures[0].id.to_string();
        let (_, pressure) = session.select(&first_id).expect("by id");
        assert_eq!(pressure.name, "First");
        assert!(session.select("missing").is_err());

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn declined_delete_leaves_the_file_alone() {
        let (root, path) = temp_document("delete");
        run(cli(&path, &["add"]), &mut refuse).expect("add");
        let before = fs::read_to_string(&path).expect("read");

        run(cli(&path, &["delete", "0"]), &mut refuse).expect("declined delete");
        assert_eq!(fs::read_to_string(&path).expect("read"), before);

        run(cli(&path, &["delete", "0"]), &mut accept).expect("confirmed delete");
        let document = PressureDocument::load(&path).expect("reload");
        assert!(document.pressures.is_empty());

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn set_requires_at_least_one_field() {
        let (root, path) = temp_document("set");
        run(cli(&path, &["add"]), &mut refuse).expect("add");

        assert!(run(cli(&path, &["set", "0"]), &mut refuse).is_err());
        run(cli(&path, &["set", "0", "--initial-value", "12"]), &mut refuse).expect("set");
        let document = PressureDocument::load(&path).expect("reload");
        assert_eq!(document.pressures[0].initial_value, 12.0);

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn non_finite_numbers_are_rejected_before_touching_the_file() {
        let (root, path) = temp_document("finite");
        run(cli(&path, &["add"]), &mut refuse).expect("add");
        let document = path.to_string_lossy().to_string();

        let rejected: [&[&str]; 3] = [
            &["set", "0", "--initial-value", "NaN"],
            &["set", "0", "--decay", "inf"],
            &["add", "--decay=-infinity"],
        ];
        for args in rejected {
            let mut argv = vec!["pressure_tools", "--document", document.as_str()];
            argv.extend_from_slice(args);
            assert!(Cli::try_parse_from(argv).is_err(), "{args:?} parsed");
        }

        let reloaded = PressureDocument::load(&path).expect("still loadable");
        assert_eq!(reloaded.pressures.len(), 1);
        assert_eq!(reloaded.pressures[0].initial_value, 50.0);
        assert_eq!(reloaded.pressures[0].decay, 5.0);

        fs::remove_dir_all(root).expect("cleanup");
    }
}
