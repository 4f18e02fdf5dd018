extern crate carecal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::agenda::Agenda;
use lib::app::{self, App};
use lib::calendar::MonthIndex;
use lib::events::Dispatcher;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use tui::backend::TermionBackend;
use tui::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "carecal",
    about = "A TUI family health calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        println!("carecal ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let agenda = Agenda::sample(MonthIndex::from(chrono::Local::now().date_naive()));

    let mut app = App::new(&config, agenda);

    if args.show {
        let stdout = stdout().into_raw_mode()?;
        let backend = TermionBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        terminal.draw(|f| app::draw(f, &mut app))?;
    } else {
        let dispatcher = Dispatcher::from_config(&config);

        let stdout = AlternateScreen::from(stdout().into_raw_mode()?);
        let backend = TermionBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        app.run(dispatcher, terminal)?;
    }

    Ok(())
}
