pub mod parser;
mod utils;

use anyhow::Error;
use clap::{App, Arg, ArgMatches};
use config::{Config, DatasetKind};
use controller::Controller;
use engine::{error::ErrorKind, Engine, Hit};
use imdb_simple::ImdbSimpleController;
use parser::Statement;
use simplelog::{LevelFilter, TermLogger, TerminalMode};
use std::path::Path;
use tmdb_merged::TmdbMergedController;

macro_rules! prompt {
    ($ed:ident, $db:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = format!("({}) {}", $db, PROMPT);

        match $ed.readline(&msg) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

fn print_help() {
    println!("Main help:");
    println!("h | help                  Shows this help");
    println!("q | quit                  Quit");
    println!("v | version               Shows the version");
    println!("recommend('<title>')      Full recommendation for a title");
    println!("similar('<title>'[, <n>]) Top n movies with the most similar overview");
    println!("suggest('<text>')         Titles matching a partial title");
    println!("info('<title>')           Details of a movie");
    println!("same_genre('<title>')     Similar movies sharing a genre");
    println!("same_crew('<title>')      Similar movies by the same director");
    println!("top_rated(['<genre>'])    Best rated movies, optionally in a genre");
    println!("popular([<n>])            Most popular movies");
    println!("describe('<text>')        Movies whose overview matches free text");
}

// Resolves a title, printing what went wrong and close titles on failure
fn resolve<'a, C: Controller>(engine: &Engine<'a, C>, title: &str) -> Option<Hit<'a>> {
    match engine.resolve(title) {
        Ok(hit) => Some(hit),
        Err(e) => {
            println!("{}", e);

            if let Some(ErrorKind::MovieNotFound(_)) = e.downcast_ref::<ErrorKind>() {
                let suggestions = engine.suggest(title);
                if !suggestions.is_empty() {
                    println!("Did you mean:");
                    utils::suggestions_table(&suggestions).printstd();
                }
            }

            None
        }
    }
}

fn execute<C: Controller>(
    engine: &Engine<C>,
    config: &Config,
    statement: Statement,
) -> Result<(), Error> {
    let poster_base = config.dataset.poster_base_url.as_str();
    let n = config.engine.top_n;

    match statement {
        Statement::Recommend(title) => {
            let rec = engine.recommend(&title)?;
            utils::print_recommendation(&rec, poster_base);
        }

        Statement::Similar(title, k) => {
            if let Some(hit) = resolve(engine, &title) {
                let similar = engine.similar(hit.movie.id, k.unwrap_or(n))?;
                if similar.is_empty() {
                    println!("Couldn't find movies similar to '{}'", hit.movie.title);
                } else {
                    utils::scored_table(&similar).printstd();
                }
            }
        }

        Statement::Suggest(text) => {
            let suggestions = engine.suggest(&text);
            if suggestions.is_empty() {
                println!("No titles match '{}'", text);
            } else {
                utils::suggestions_table(&suggestions).printstd();
            }
        }

        Statement::Info(title) => {
            if let Some(hit) = resolve(engine, &title) {
                utils::info_table(hit.movie, poster_base).printstd();
            }
        }

        Statement::SameGenre(title) => {
            if let Some(hit) = resolve(engine, &title) {
                let found = engine.same_genre(hit.movie.id, n)?;
                if found.is_empty() {
                    println!("No other movies share a genre with '{}'", hit.movie.title);
                } else {
                    utils::scored_table(&found).printstd();
                }
            }
        }

        Statement::SameCrew(title) => {
            if let Some(hit) = resolve(engine, &title) {
                let found = engine.same_crew(hit.movie.id, n)?;
                if found.is_empty() {
                    println!("No other movies by the director of '{}'", hit.movie.title);
                } else {
                    utils::scored_table(&found).printstd();
                }
            }
        }

        Statement::TopRated(genre) => {
            let found = engine.top_rated(genre.as_deref());
            if found.is_empty() {
                println!("No movies with at least {} votes", config.engine.min_votes);
            } else {
                utils::movies_table(&found).printstd();
            }
        }

        Statement::Popular(k) => {
            utils::movies_table(&engine.popular(k.unwrap_or(n))).printstd();
        }

        Statement::Describe(text) => {
            let found = engine.similar_to_text(&text, n);
            if found.is_empty() {
                println!("Nothing in the catalog resembles that description");
            } else {
                utils::scored_table(&found).printstd();
            }
        }
    }

    Ok(())
}

fn run<C: Controller>(controller: C, config: &Config, query: Option<&str>) -> Result<(), Error> {
    let engine = Engine::with_controller(&controller, config)?;

    if let Some(query) = query {
        let rec = engine.recommend(query)?;
        utils::print_recommendation(&rec, &config.dataset.poster_base_url);
        return Ok(());
    }

    println!(
        "Loaded {} movies from {}, type 'help' to see the commands",
        controller.movies().len(),
        controller.name()
    );

    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl, controller.name())?;

        match opt.trim() {
            "?" | "h" | "help" => print_help(),

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(statement) => {
                    if let Err(e) = execute(&engine, config, statement) {
                        log::error!("{}", e);
                    }
                }

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    let path = Path::new(matches.value_of("config").unwrap_or("recommender.toml"));

    let mut config = if path.exists() {
        log::info!("Using configuration from {}", path.display());
        Config::load(path)?
    } else {
        log::warn!("{} not found, using default configuration", path.display());
        Config::default()
    };

    if let Some(data) = matches.value_of("data") {
        config.dataset.path = data.into();
    }

    if let Some(kind) = matches.value_of("kind") {
        config.dataset.kind =
            DatasetKind::from_name(kind).ok_or_else(|| anyhow::anyhow!("unknown kind {}", kind))?;
    }

    if matches.is_present("no-cache") {
        config.cache.enabled = false;
    }

    Ok(config)
}

fn main() -> Result<(), Error> {
    let matches = App::new("movie-recommender")
        .version(VERSION)
        .about("Content based movie recommendations from a CSV catalog")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .default_value("recommender.toml")
                .help("Configuration file"),
        )
        .arg(
            Arg::with_name("data")
                .short("d")
                .long("data")
                .value_name("CSV")
                .help("Dataset to load, overrides the configuration"),
        )
        .arg(
            Arg::with_name("kind")
                .short("k")
                .long("kind")
                .value_name("KIND")
                .possible_values(&["tmdb-merged", "imdb-simple"])
                .help("Layout of the dataset"),
        )
        .arg(
            Arg::with_name("no-cache")
                .long("no-cache")
                .help("Always recompute the similarity matrix"),
        )
        .arg(
            Arg::with_name("query")
                .short("q")
                .long("query")
                .value_name("TITLE")
                .help("Print recommendations for a title and exit"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging, repeat for even more"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed)?;

    let config = load_config(&matches)?;
    let query = matches.value_of("query");

    if query.is_none() {
        println!("Welcome to movie-recommender {}", VERSION);
    }

    match config.dataset.kind {
        DatasetKind::TmdbMerged => run(
            TmdbMergedController::from_path(&config.dataset.path)?,
            &config,
            query,
        ),

        DatasetKind::ImdbSimple => run(
            ImdbSimpleController::from_path(&config.dataset.path)?,
            &config,
            query,
        ),
    }
}
