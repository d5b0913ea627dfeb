use input_tester::devices::discover_input_sources;
use input_tester::dispatcher::Dispatcher;
use input_tester::error::Error;
use input_tester::event::Event;
use input_tester::haptic::{open_haptic_device, Rumble};
use input_tester::layout::{FONT_FILE, FONT_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use input_tester::logger::{log, log_detail, log_error, set_verbosity, Verbosity};
use input_tester::reader::spawn_reader;
use input_tester::render::{Display, TextRenderer};
use input_tester::session::Session;
use std::path::Path;
use std::process::ExitCode;
use tokio::sync::mpsc;

const WINDOW_TITLE: &str = "Input test";
const VERBOSITY: Verbosity = Verbosity::Low;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    set_verbosity(VERBOSITY);
    log(Verbosity::Low, "🚀 Input tester starting...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error("Input tester failed", &e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), Error> {
    let text = TextRenderer::load(Path::new(FONT_FILE), FONT_SIZE)?;
    let display = Display::open(WINDOW_TITLE, SCREEN_WIDTH, SCREEN_HEIGHT, text)?;
    log(Verbosity::Medium, "✓ Display ready");

    let haptic = open_haptic_device().map(|device| {
        log_detail(Verbosity::Low, "✓ Force feedback ready", device.name());
        Box::new(device) as Box<dyn Rumble>
    });

    let (tx, rx) = mpsc::unbounded_channel();
    let (sources, joysticks) = discover_input_sources();
    for source in sources {
        let name = source.name.clone();
        if let Err(e) = spawn_reader(source, tx.clone()) {
            log_error(&format!("Reading \"{}\" failed (non-fatal)", name), &e.to_string());
        }
    }

    let quit_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(Event::Quit);
        }
    });
    drop(tx);

    let session = Session::new(display, Dispatcher::new(joysticks), haptic, rx);
    log(Verbosity::Low, "Press keys to test them; Start+Select to exit");
    session.run().await?;
    Ok(())
}
