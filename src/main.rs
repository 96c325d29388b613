use clap::{Parser, Subcommand};
use photo_table::config::{self, AppConfig, ViewConfig};
use photo_table::controller::{Action, TableView, ViewState};
use photo_table::dataset::Dataset;
use photo_table::sort::SortKey;
use photo_table::types::EnrichedPhoto;
use photo_table::{output, render};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Filter and sort flags shared by the commands that show the table.
#[derive(clap::Args, Clone, Default)]
struct FilterArgs {
    /// Case-insensitive substring to look for in photo titles
    #[arg(long)]
    search: Option<String>,

    /// Only photos in albums owned by this user id
    #[arg(long)]
    owner: Option<u32>,

    /// Only photos in this album; repeat for several (repeating an id toggles it off)
    #[arg(long = "album", value_name = "ID")]
    albums: Vec<u32>,

    /// Sort column: id, photoName, albumName, userName or unset
    #[arg(long, value_name = "KEY")]
    sort: Option<SortKey>,
}

impl FilterArgs {
    /// The flags as controller actions, applied in this order.
    fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(text) = &self.search {
            actions.push(Action::SetSearch(text.clone()));
        }
        if let Some(owner) = self.owner {
            actions.push(Action::SelectOwner(owner));
        }
        actions.extend(self.albums.iter().copied().map(Action::ToggleAlbum));
        if let Some(key) = self.sort {
            actions.push(Action::SetSort(key));
        }
        actions
    }
}

#[derive(Parser)]
#[command(name = "photo-table")]
#[command(version)]
#[command(about = "Filter and sort a table of photos, albums and their owners")]
#[command(long_about = "\
Filter and sort a table of photos, albums and their owners

Photos are joined to their album and the album's owner once at startup.
Filters (search text, owner, albums) and the sort column are applied on top.

Data directory layout:

  data/
  ├── config.toml      # Optional, see 'photo-table gen-config'
  ├── users.json       # [{ \"id\": 1, \"name\": \"Roma\", \"sex\": \"m\" }]
  ├── albums.json      # [{ \"id\": 1, \"title\": \"...\", \"userId\": 1 }]
  └── photos.json      # [{ \"id\": 1, \"title\": \"...\", \"albumId\": 1, \"url\": \"...\" }]

Without --data the built-in sample dataset is used.

Filters:
  --search TEXT   title contains TEXT (trimmed, case-insensitive)
  --owner ID      album owner is user ID
  --album ID      album is one of the selected ids (repeatable)
All active filters must match.")]
struct Cli {
    /// Data directory (omit to use the built-in sample)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file layered over <data>/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filtered, sorted table
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the table and filter controls as an HTML page
    Render {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output HTML file
        #[arg(long, default_value = "photos.html")]
        output: PathBuf,
    },
    /// Change filters and sorting command by command, reprinting the table
    Interactive {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List users (owner filter choices)
    Users,
    /// List albums (album filter choices)
    Albums {
        /// Only albums owned by this user id
        #[arg(long)]
        owner: Option<u32>,
    },
    /// Load and join the dataset without printing the table
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::List { filters, json } => {
            let (app_config, dataset) = load(&cli)?;
            let rows = dataset.join()?;
            let state = initial_state(&app_config, filters);
            let view = TableView::compute(&rows, &state);
            if *json {
                println!("{}", serde_json::to_string_pretty(&view.rows)?);
            } else {
                output::print_table(&view, state.sort_key, &app_config.view.no_results_message);
            }
        }
        Command::Render { filters, output } => {
            let (app_config, dataset) = load(&cli)?;
            let rows = dataset.join()?;
            let state = initial_state(&app_config, filters);
            let view = TableView::compute(&rows, &state);
            render::write_page(output, &dataset, &state, &view, &app_config.view)?;
            println!(
                "Rendered {} of {} photos → {}",
                view.visible_count(),
                rows.len(),
                output.display()
            );
        }
        Command::Interactive { filters } => {
            let (app_config, dataset) = load(&cli)?;
            let rows = dataset.join()?;
            let state = initial_state(&app_config, filters);
            run_interactive(&dataset, &rows, state, &app_config.view)?;
        }
        Command::Users => {
            let (_, dataset) = load(&cli)?;
            output::print_lines(&output::format_users(&dataset.users, None));
        }
        Command::Albums { owner } => {
            let (_, dataset) = load(&cli)?;
            output::print_lines(&output::format_albums(
                dataset.albums_of(*owner),
                &dataset.users,
                &ViewState::default(),
            ));
        }
        Command::Check => {
            let (_, dataset) = load(&cli)?;
            let rows = dataset.join()?;
            output::print_lines(&output::format_check(&dataset, rows.len()));
            println!("==> Dataset is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route `log` output to stderr, defaulting to warnings only.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Resolve the config layers and load the dataset they point at.
fn load(cli: &Cli) -> Result<(AppConfig, Dataset), Box<dyn std::error::Error>> {
    let app_config = config::load_config(cli.data.as_deref(), cli.config.as_deref())?;
    let dataset = match &cli.data {
        Some(dir) => Dataset::load(dir, &app_config.dataset)?,
        None => Dataset::builtin()?,
    };
    Ok((app_config, dataset))
}

/// Configured default sort, then the command-line flags.
fn initial_state(app_config: &AppConfig, filters: &FilterArgs) -> ViewState {
    ViewState::with_sort(app_config.view.default_sort).apply_all(filters.actions())
}

const INTERACTIVE_HELP: &str = "\
Commands:
  search <text>   set the search text        clear-search   clear it
  owner <id>      show one owner's albums    owner all      any owner
  album <id>      toggle an album            album all      any album
  sort <key>      id, photoName, albumName, userName or unset
  reset           clear all filters (keeps the sort)
  users, albums   list filter choices
  help, quit";

/// Read commands from stdin until EOF or `quit`, reprinting after each change.
fn run_interactive(
    dataset: &Dataset,
    rows: &[EnrichedPhoto],
    mut state: ViewState,
    view_config: &ViewConfig,
) -> io::Result<()> {
    println!("{}", INTERACTIVE_HELP);
    show(rows, &state, view_config);
    prompt()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{}", INTERACTIVE_HELP),
            "users" => output::print_lines(&output::format_users(
                &dataset.users,
                state.criteria.owner_id,
            )),
            "albums" => output::print_lines(&output::format_albums(
                &dataset.albums,
                &dataset.users,
                &state,
            )),
            _ => match line.parse::<Action>() {
                Ok(action) => {
                    state = state.apply(action);
                    show(rows, &state, view_config);
                }
                Err(err) => eprintln!("error: {err}"),
            },
        }
        prompt()?;
    }
    Ok(())
}

fn show(rows: &[EnrichedPhoto], state: &ViewState, view_config: &ViewConfig) {
    let view = TableView::compute(rows, state);
    println!();
    println!("[{}]", output::format_state(state));
    output::print_table(&view, state.sort_key, &view_config.no_results_message);
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
