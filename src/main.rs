extern crate reading_plan;

extern crate ansi_term;
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate tracing;

use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use ansi_term::{Colour, Style};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use reading_plan::errors::*;
use reading_plan::observe::Tally;
use reading_plan::planner::{parse_chapters, NT_LABEL, OT_LABEL};
use reading_plan::{export, logging, LocalStore, Planner, Version};

/// Environment variable naming the data directory when `--data-dir`
/// is not given.
const DATA_DIR_VAR: &'static str = "READING_PLAN_DIR";

/// Describes all the styles that can be used in printing text.
/// Mostly just good for disabling custom formatting.
#[derive(Debug, Clone)]
struct StyleSet {
    /// Normal text
    normal: Style,
    /// Title text (passages, plan names)
    title: Style,
    /// Description (or label) text
    description: Style,
    /// Marker for a finished day
    done: Style,
    /// Error text
    error: Style,
}

impl StyleSet {
    /// Preset for the --no-ansi option (no style)
    fn no_ansi() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Style::new(),
            description: Style::new(),
            done: Style::new(),
            error: Style::new(),
        }
    }

    /// Preset for the normal "fancy" style
    fn fancy() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Colour::White.bold(),
            description: Style::new().italic(),
            done: Colour::Green.bold(),
            error: Colour::Red.normal(),
        }
    }
}

/// Returns styled text (using a format string syntax)
macro_rules! style {
    ($style:expr, $($arg:tt)*) => {
        {{
            $style.paint(format!( $($arg)*) )
        }}
    }
}

/// Prints a line of text in the given style
macro_rules! styleln {
    ($style:expr, $($arg:tt)*) => {
        println!("{}", style!($style, $($arg)*))
    }
}

fn keep_progress_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("keep-progress")
        .short("k")
        .long("keep-progress")
        .help("Keep the days already marked as done")
}

fn days_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("DAY")
        .help("The day numbers to change")
        .required(true)
        .multiple(true)
}

pub fn main() {
    let matches = App::new("reading-plan")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ian Johnson <ianprime0509@gmail.com>")
        .about("A daily Bible reading plan and progress tracker")
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(Arg::with_name("no-ansi")
            .help("Disables fancy text output")
            .short("n")
            .long("no-ansi"))
        .arg(Arg::with_name("data-dir")
            .help("Directory where settings and progress are kept")
            .short("d")
            .long("data-dir")
            .value_name("DIR")
            .takes_value(true))
        .subcommand(SubCommand::with_name("status").about("Shows the active plan and progress through it"))
        .subcommand(SubCommand::with_name("settings")
            .about("Shows or changes the settings of the default plan")
            .arg(Arg::with_name("translation")
                .short("t")
                .long("translation")
                .value_name("VERSION")
                .possible_values(&["nasb", "lsb", "esv"])
                .help("The translation to link passages to")
                .takes_value(true))
            .arg(Arg::with_name("ot")
                .long("ot")
                .value_name("CHAPTERS")
                .help("Old Testament chapters per day")
                .takes_value(true))
            .arg(Arg::with_name("nt")
                .long("nt")
                .value_name("CHAPTERS")
                .help("New Testament chapters per day")
                .takes_value(true))
            .arg(keep_progress_arg())
            .after_help("Chapters per day must be between 1 and 100. Changing them clears progress through \
                         the default plan unless --keep-progress is given."))
        .subcommand(SubCommand::with_name("custom")
            .about("Loads a custom plan, or switches back to the one loaded before")
            .arg(Arg::with_name("FILENAME").help("A text file with one passage per line"))
            .arg(keep_progress_arg())
            .after_help("Each non-blank line of the file becomes one day of the plan, in order (at most \
                         2000 days). References are tidied up, e.g. 'gen1' becomes 'Gen 1'."))
        .subcommand(SubCommand::with_name("default").about("Switches to the default chapters-per-day plan"))
        .subcommand(SubCommand::with_name("view")
            .about("Views days of the active plan")
            .arg(Arg::with_name("day")
                .long("day")
                .value_name("DAY")
                .help("The first day to view (default: the first day not done)")
                .takes_value(true))
            .arg(Arg::with_name("count")
                .short("c")
                .long("count")
                .value_name("COUNT")
                .default_value("1")
                .help("The number of days to view")
                .takes_value(true)))
        .subcommand(SubCommand::with_name("check")
            .about("Marks days as done")
            .arg(days_arg()))
        .subcommand(SubCommand::with_name("uncheck")
            .about("Marks days as not done")
            .arg(days_arg()))
        .subcommand(SubCommand::with_name("clear").about("Marks every day of the active plan as not done"))
        .subcommand(SubCommand::with_name("export")
            .about("Exports the active plan and progress as an Excel workbook")
            .arg(Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("OUTPUT")
                .help("The output filename")
                .takes_value(true))
            .after_help("If no output filename is specified, the filename will be 'reading-plan.xlsx'."))
        .after_help("The default plan reads a number of Old and New Testament chapters each day; the \
                     shorter testament starts over until the longer one is finished. Settings and \
                     progress are kept in --data-dir, the READING_PLAN_DIR environment variable, or the \
                     user data directory.")
        .get_matches();

    // Whether we should disable the fancy ANSI terminal text
    let no_ansi = matches.is_present("no-ansi");
    // The style to use
    let style_set = if no_ansi {
        StyleSet::no_ansi()
    } else {
        StyleSet::fancy()
    };

    if let Err(ref e) = logging::init("warn") {
        eprintln!("Warning: {}", e);
    }

    // Handle errors nicely
    if let Err(ref e) = run(&matches, &style_set) {
        styleln!(style_set.error, "Error: {}", e);

        for e in e.iter().skip(1) {
            styleln!(style_set.error, "Caused by: {}", e);
        }

        if let Some(backtrace) = e.backtrace() {
            styleln!(style_set.error, "Backtrace: {:?}", backtrace);
        }

        std::process::exit(1);
    }
}

/// The main program logic.
/// Each subcommand should do its own printing, except for errors, which are returned.
fn run(m: &ArgMatches, style_set: &StyleSet) -> Result<()> {
    let tally = Tally::new();
    let store = open_store(m)?.with_observer(tally.clone());
    debug!(dir = %store.dir().display(), "opened store");

    // Run the appropriate subcommand
    let result = match m.subcommand() {
        ("settings", Some(sub_m)) => settings(sub_m, &store, style_set),
        ("custom", Some(sub_m)) => custom(sub_m, &store, style_set),
        ("default", Some(_)) => default(&store, style_set),
        ("view", Some(sub_m)) => view(sub_m, &store, style_set),
        ("check", Some(sub_m)) => check(sub_m, &store, style_set, true),
        ("uncheck", Some(sub_m)) => check(sub_m, &store, style_set, false),
        ("clear", Some(_)) => clear(&store, style_set),
        ("export", Some(sub_m)) => export(sub_m, &store, style_set),
        _ => status(&store, style_set),
    };

    debug!(reads = tally.reads(), writes = tally.writes(), "store activity");
    result
}

/// Opens the store named on the command line or in the environment,
/// falling back to the user data directory.
fn open_store(m: &ArgMatches) -> Result<LocalStore> {
    let dir = match m.value_of("data-dir") {
        Some(d) => Some(PathBuf::from(d)),
        None => env::var_os(DATA_DIR_VAR).map(PathBuf::from),
    };

    match dir {
        Some(d) => Ok(LocalStore::open(d)),
        None => LocalStore::open_default().chain_err(|| "could not open data directory"),
    }
}

fn load(store: &LocalStore) -> Result<Planner> {
    let state = store.load_state().chain_err(|| "could not load saved plan")?;
    Ok(Planner::new(state))
}

fn save(store: &LocalStore, planner: &Planner) -> Result<()> {
    store.save_state(planner.state()).chain_err(|| "could not save plan")
}

/// Describes the active plan in a few words.
fn plan_description(planner: &Planner) -> String {
    let settings = planner.state().settings;
    if planner.is_custom() {
        format!("custom plan ({})", settings.version)
    } else {
        format!("default plan ({}, {} {} and {} {} chapters a day)",
                settings.version,
                settings.ot_chapters,
                OT_LABEL,
                settings.nt_chapters,
                NT_LABEL)
    }
}

/// The `status` subcommand logic
fn status(store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    let summary = planner.summary()?;

    println!("{} {}",
             style!(style_set.normal, "Active plan:"),
             style!(style_set.title, "{}", plan_description(&planner)));
    styleln!(style_set.normal,
             "Progress: {} of {} days done",
             summary.completed,
             summary.total_days);

    match summary.next_day {
        Some(day) => {
            if let Some(row) = planner.schedule()?.iter().find(|r| r.day == day) {
                println!("{} {}",
                         style!(style_set.normal, "Next reading (day {}):", day),
                         style!(style_set.title, "{}", row.passages));
            }
        }
        None => styleln!(style_set.done, "Every day of the plan is done"),
    }

    Ok(())
}

/// The `settings` subcommand logic
fn settings(m: &ArgMatches, store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    let mut settings = planner.state().settings;

    let changing = m.is_present("translation") || m.is_present("ot") || m.is_present("nt");
    if changing {
        if let Some(v) = m.value_of("translation") {
            settings.version = Version::from_tag(v);
        }
        if let Some(ot) = m.value_of("ot") {
            settings.ot_chapters = parse_chapters(OT_LABEL, ot)?;
        }
        if let Some(nt) = m.value_of("nt") {
            settings.nt_chapters = parse_chapters(NT_LABEL, nt)?;
        }
        planner.update_settings(settings, m.is_present("keep-progress"))?;
        let days = planner.default_days();
        save(store, &planner)?;
        styleln!(style_set.normal, "Updated settings; the default plan is now {} days", days);
    }

    println!("{} {}",
             style!(style_set.description, "{:24}", "Version:"),
             style!(style_set.title, "{}", settings.version));
    println!("{} {}",
             style!(style_set.description, "{:24}", format!("{} chapters:", OT_LABEL)),
             style!(style_set.title, "{}", settings.ot_chapters));
    println!("{} {}",
             style!(style_set.description, "{:24}", format!("{} chapters:", NT_LABEL)),
             style!(style_set.title, "{}", settings.nt_chapters));
    Ok(())
}

/// The `custom` subcommand logic
fn custom(m: &ArgMatches, store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;

    match m.value_of("FILENAME") {
        Some(filename) => {
            let path = Path::new(filename);
            let text = fs::read_to_string(path)
                .chain_err(|| ErrorKind::Io(format!("could not read file {}", path.display())))?;
            let days = planner.load_custom(&text, m.is_present("keep-progress"))
                .chain_err(|| "could not load custom plan")?;
            save(store, &planner)?;
            styleln!(style_set.normal, "Loaded custom plan with {} days", days);
        }
        None => {
            planner.use_custom()?;
            save(store, &planner)?;
            styleln!(style_set.normal, "Switched to the custom plan");
        }
    }
    Ok(())
}

/// The `default` subcommand logic
fn default(store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    planner.use_default();
    save(store, &planner)?;
    styleln!(style_set.normal, "Switched to the {}", plan_description(&planner));
    Ok(())
}

/// The `view` subcommand logic
fn view(m: &ArgMatches, store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    // We can unwrap this because we set a default value
    let count: usize = m.value_of("count")
        .unwrap()
        .parse()
        .chain_err(|| "invalid numeric argument to `--count`")?;

    let start = match m.value_of("day") {
        Some(d) => parse_day(d)?,
        None => {
            match planner.summary()?.next_day {
                Some(day) => day,
                None => {
                    styleln!(style_set.normal,
                             "Every day of the plan is done (use `reading-plan view --day 1` to look back)");
                    return Ok(());
                }
            }
        }
    };

    let rows = planner.schedule()?.to_vec();
    if start < 1 || start as usize > rows.len() {
        return Err(ErrorKind::DayOutOfRange(start, rows.len()).into());
    }

    // Print out the given number of days, starting at the requested one
    for row in rows.iter().skip(start as usize - 1).take(count) {
        let mark = if planner.is_done(row.day) {
            style!(style_set.done, "[x]")
        } else {
            style!(style_set.normal, "[ ]")
        };

        println!("{} {} {}",
                 style!(style_set.normal, "{:>8}", format!("Day {}", row.day)),
                 mark,
                 style!(style_set.title, "{}", row.passages));
        styleln!(style_set.description, "{:12} {}", "", row.url);
    }

    Ok(())
}

fn parse_day(day: &str) -> Result<u32> {
    day.parse().chain_err(|| format!("invalid day '{}'", day))
}

/// The `check` subcommand logic.
/// The `done` argument specifies whether days are marked as done;
/// set this to false to get the `uncheck` subcommand logic, since it's
/// almost identical.
fn check(m: &ArgMatches, store: &LocalStore, style_set: &StyleSet, done: bool) -> Result<()> {
    let mut planner = load(store)?;
    // DAY is required, so there is always at least one
    let days = m.values_of("DAY").into_iter().flat_map(|v| v).map(parse_day).collect::<Result<Vec<_>>>()?;

    for &day in &days {
        planner.set_done(day, done)?;
    }
    save(store, &planner)?;

    let label = if done { "done" } else { "not done" };
    for day in days {
        styleln!(style_set.normal, "Marked day {} as {}", day, label);
    }
    Ok(())
}

/// The `clear` subcommand logic
fn clear(store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    planner.clear_progress()?;
    save(store, &planner)?;
    styleln!(style_set.normal,
             "Cleared progress of the {}",
             if planner.is_custom() {
                 "custom plan"
             } else {
                 "default plan"
             });
    Ok(())
}

/// The `export` subcommand logic.
fn export(m: &ArgMatches, store: &LocalStore, style_set: &StyleSet) -> Result<()> {
    let mut planner = load(store)?;
    let output = m.value_of("output").unwrap_or("reading-plan.xlsx");

    // Open the output file for writing, with an error if it already exists
    let path = Path::new(output);
    if path.exists() {
        bail!("output file '{}' already exists; will not overwrite", output);
    }
    let file = File::create(path).chain_err(|| ErrorKind::Io("could not open output file".into()))?;

    let rows = planner.schedule()?.to_vec();
    export::write_xlsx(&rows, planner.progress(), file).chain_err(|| "could not write to output file")?;
    styleln!(style_set.normal, "Wrote {} days to '{}'", rows.len(), output);
    Ok(())
}
