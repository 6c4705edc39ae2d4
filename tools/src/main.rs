//! house-runner: headless host for a miihouse household.
//!
//! Usage:
//!   house-runner --seed 12345 --ticks 100 --db house.db
//!   house-runner --db house.db --ipc-mode < commands.jsonl

use anyhow::Result;
use miihouse_core::{
    clock::TickMode,
    config::SimConfig,
    engine::Action,
    inventory::InventoryEntry,
    resident::Resident,
    session::Session,
    store::SimStore,
    types::{Money, Tick},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    CreateResident {
        name: String,
        #[serde(default)]
        gender: String,
        #[serde(default = "default_personality")]
        personality: String,
    },
    Select {
        resident_id: String,
    },
    Action {
        action: Action,
    },
    Buy {
        item_id: String,
        #[serde(default = "one")]
        qty: u32,
    },
    Use {
        item_id: String,
    },
    Party,
    SetMode {
        mode: TickMode,
    },
    Tick {
        #[serde(default = "one_tick")]
        count: u64,
    },
    Advance {
        millis: u64,
    },
    Save,
    Load,
    Export,
    Import {
        text: String,
    },
    Quit,
}

fn default_personality() -> String {
    "easygoing".to_string()
}

fn one() -> u32 {
    1
}

fn one_tick() -> u64 {
    1
}

#[derive(serde::Serialize)]
struct UiNotice {
    message: String,
    duration_ms: u64,
    is_error: bool,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    tick: Tick,
    money: Money,
    mode: TickMode,
    auto_ticking: bool,
    active_resident_id: Option<&'a str>,
    residents: &'a [Resident],
    inventory: &'a [InventoryEntry],
    notice: Option<UiNotice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    export: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 100u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::default(),
    };

    if !ipc_mode {
        println!("miihouse: house-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  db:        {db}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(built-in)"));
        println!();
    }

    let store = SimStore::open(db)?;
    store.migrate()?;
    let mut session = Session::open(store, &config, seed)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        run_batch(&mut session, ticks)?;
        print_summary(&session, ticks)?;
    }

    Ok(())
}

fn run_batch(session: &mut Session, ticks: u64) -> Result<()> {
    if session.state().residents.is_empty() {
        session.create_resident("Ana", "female", "energetic")?;
        session.create_resident("Ben", "male", "laid-back")?;
        session.create_resident("Cai", "male", "easygoing")?;
    }
    for _ in 0..ticks {
        session.tick_now()?;
    }
    // A failed save is reported below, not fatal.
    if let Err(e) = session.save() {
        log::warn!("final save failed: {e}");
    }
    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut last_seen = Instant::now();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        // Deliver whatever timers came due while we were blocked on input.
        let now = Instant::now();
        session.advance(now - last_seen);
        last_seen = now;

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }
        let export = handle_command(session, cmd);
        let state = build_ui_state(session, export);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Run one command. Failures are already on the session notice, so they
/// only get logged here. Returns export text when there is some.
fn handle_command(session: &mut Session, cmd: IpcCommand) -> Option<String> {
    let outcome = match cmd {
        IpcCommand::GetState | IpcCommand::Quit => Ok(()),
        IpcCommand::CreateResident { name, gender, personality } => session
            .create_resident(&name, &gender, personality.as_str())
            .map(drop),
        IpcCommand::Select { resident_id } => session.select_resident(&resident_id).map(drop),
        IpcCommand::Action { action } => session.perform(action).map(drop),
        IpcCommand::Buy { item_id, qty } => session.purchase(&item_id, qty).map(drop),
        IpcCommand::Use { item_id } => session.use_item(&item_id).map(drop),
        IpcCommand::Party => session.throw_party().map(drop),
        IpcCommand::SetMode { mode } => {
            session.set_tick_mode(mode);
            Ok(())
        }
        IpcCommand::Tick { count } => (0..count).try_for_each(|_| session.tick_now().map(drop)),
        IpcCommand::Advance { millis } => {
            session.advance(Duration::from_millis(millis));
            Ok(())
        }
        IpcCommand::Save => session.save().map(drop),
        IpcCommand::Load => session.load().map(drop),
        IpcCommand::Export => return session.export().ok(),
        IpcCommand::Import { text } => session.import(&text).map(drop),
    };
    if let Err(e) = outcome {
        log::debug!("command rejected: {e}");
    }
    None
}

fn build_ui_state(session: &Session, export: Option<String>) -> UiState<'_> {
    let state = session.state();
    UiState {
        tick: session.current_tick(),
        money: state.money,
        mode: state.settings.mode,
        auto_ticking: session.is_auto_ticking(),
        active_resident_id: session.active_resident_id(),
        residents: &state.residents,
        inventory: state.inventory.entries(),
        notice: session.notice().map(|n| UiNotice {
            message: n.message.clone(),
            duration_ms: n.duration.as_millis() as u64,
            is_error: n.is_error,
        }),
        export,
    }
}

fn print_summary(session: &Session, ticks: u64) -> Result<()> {
    let state = session.state();
    println!("=== HOUSEHOLD SUMMARY ===");
    println!("  ticks run:   {ticks}");
    println!("  final tick:  {}", session.current_tick());
    println!("  money:       {}", state.money);
    println!("  residents:   {}", state.residents.len());
    println!("  inventory:   {} item types", state.inventory.len());
    println!(
        "  saved at:    {}",
        session.store().saved_at()?.unwrap_or_else(|| "(never)".into())
    );

    println!();
    println!("=== RESIDENTS ===");
    for r in &state.residents {
        println!(
            "  {:<10} {:<10} hunger {:>5.1} | happy {:>5.1} | social {:>5.1}{}",
            r.name,
            r.personality.as_str(),
            r.hunger,
            r.happiness,
            r.social,
            if r.asleep { " | asleep" } else { "" }
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
