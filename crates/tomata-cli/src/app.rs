//! Wires configuration, ledger, template and collaborators into one cycle
//! run. Everything interactive lives behind the core's collaborator traits.

use std::error::Error;

use tracing::info;

use tomata_core::{
    CancelToken, Config, Countdown, CycleConfig, CycleController, TagLedger, TemplateStore,
};

use crate::alerts::DesktopAlerts;
use crate::prompt::ConsolePrompt;
use crate::screen::TermScreen;
use crate::Cli;

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_init()?;
    let mut ledger = TagLedger::open()?;

    if cli.clear {
        let mut prompt = ConsolePrompt::new();
        if prompt.confirm("This permanently deletes all tag history. Continue?")? {
            ledger.reset_all()?;
            println!("Tag history cleared.");
        } else {
            println!("Nothing deleted.");
        }
        return Ok(());
    }

    if cli.stats {
        print_summary(&ledger, cli.json)?;
        return Ok(());
    }

    let style = cli.style.unwrap_or(config.ui.style);
    let mut store = TemplateStore::new();
    let template = store.load(style)?.clone();

    let minutes = cli.work.unwrap_or(config.timer.work_minutes);
    let cycle_config = CycleConfig::from_minutes(minutes)?;

    // Ctrl-C aborts the running countdown; the state machine treats that as
    // a normal transition, not a crash.
    let token = CancelToken::new();
    {
        let token = token.clone();
        ctrlc::set_handler(move || token.cancel())?;
    }

    let mut prompt = ConsolePrompt::new();
    let tag = match cli.tag {
        Some(tag) => tag,
        None => prompt.initial_tag()?,
    };

    let mut screen = TermScreen::new();
    let alerts = DesktopAlerts::new(config.alerts.notifications, config.alerts.sound);
    let mut controller = CycleController::new(
        cycle_config,
        Countdown::new(token),
        &template,
        &mut ledger,
        &mut prompt,
        &mut screen,
        &alerts,
        tag,
    );
    controller.run()?;
    info!(events = controller.events().len(), "cycle finished");
    drop(controller);

    if !ledger.is_empty() {
        println!();
        print_summary(&ledger, false)?;
    }
    Ok(())
}

fn print_summary(ledger: &TagLedger, json: bool) -> Result<(), Box<dyn Error>> {
    let ranked = ledger.ranked_summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    if ranked.is_empty() {
        println!("No completed work segments yet.");
        return Ok(());
    }
    let width = ranked
        .iter()
        .map(|r| r.tag.chars().count())
        .max()
        .unwrap_or(3)
        .max(3);
    println!("{:<width$}  completed", "tag");
    for record in &ranked {
        println!("{:<width$}  {}", record.tag, record.count);
    }
    Ok(())
}
