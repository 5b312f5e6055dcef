// xojt - headless editing of the default page template and .xojt files

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use pagetemplate_config::template_file::with_template_extension;
use pagetemplate_config::{
    background_choices, ConfigError, FileSettingsStore, SettingsStore, TemplateEditor,
};
use pagetemplate_core::{serialize, Color, UnitTable};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE, EXIT_VALUE};

#[derive(Parser)]
#[command(name = "xojt")]
#[command(about = "Edit the default page template and .xojt template files")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (default: <config dir>/pagetemplate/settings.json)
    #[arg(long, global = true, env = "XOJT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored page template
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the stored page template
    #[command(after_help = "\
Examples:
  xojt set --width 612 --height 792
  xojt set --background lined --color '#FFFFE0'
  xojt set --copy-last true")]
    Set {
        /// Page width in points
        #[arg(long)]
        width: Option<f64>,

        /// Page height in points
        #[arg(long)]
        height: Option<f64>,

        /// Background color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,

        /// Background pattern
        #[arg(long)]
        background: Option<Background>,

        /// New pages copy the previous page instead of using this template
        #[arg(long)]
        copy_last: Option<bool>,
    },

    /// Save the stored page template to a .xojt file
    Save {
        /// Target file (default: dated name in the last template folder)
        path: Option<PathBuf>,
    },

    /// Load a .xojt file into the settings
    Load {
        path: PathBuf,
    },

    /// List display units
    Units,

    /// Format a length in points for display
    Format {
        /// Length in points
        length: f64,

        /// Unit index (default: the configured unit)
        #[arg(long)]
        unit: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Background {
    Plain,
    Lined,
    Ruled,
    Graph,
}

impl Background {
    /// Position in the editor's background selector
    fn choice_index(self) -> usize {
        match self {
            Background::Plain => 0,
            Background::Lined => 1,
            Background::Ruled => 2,
            Background::Graph => 3,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = match &cli.config {
        Some(path) => FileSettingsStore::open(path),
        None => FileSettingsStore::open_default(),
    };
    log::debug!("settings: {}", store.path().display());

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: xojt <command> [options]");
            eprintln!("       xojt --help for more information");
            Ok(())
        }
        Some(Commands::Show { json }) => cmd_show(store, json),
        Some(Commands::Set { width, height, color, background, copy_last }) => {
            cmd_set(store, width, height, color, background, copy_last)
        }
        Some(Commands::Save { path }) => cmd_save(store, path),
        Some(Commands::Load { path }) => cmd_load(store, path),
        Some(Commands::Units) => cmd_units(store),
        Some(Commands::Format { length, unit }) => cmd_format(store, length, unit),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn value(msg: impl Into<String>) -> Self {
        Self { code: EXIT_VALUE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => CliError::io(err.to_string()),
            ConfigError::Template(_) => CliError::value(err.to_string()),
            ConfigError::Parse { .. } => CliError::error(err.to_string())
                .with_hint("fix the settings file, or delete it to start from defaults"),
            ConfigError::Serialize(_) => CliError::error(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::error(format!("cannot encode output: {}", err))
    }
}

// ============================================================================
// show
// ============================================================================

fn cmd_show(store: FileSettingsStore, json: bool) -> Result<(), CliError> {
    let editor = TemplateEditor::open(store);
    let template = editor.template();
    let descriptor = serialize(template);
    let size = editor.page_size_label();

    if json {
        let json_output = serde_json::json!({
            "descriptor": descriptor,
            "template": template,
            "size": size,
            "unitIndex": editor.store().size_unit_index(),
        });
        let text = serde_json::to_string_pretty(&json_output)?;
        println!("{}", text);
        return Ok(());
    }

    let background = background_choices()
        .get(editor.active_background_index())
        .map(|c| c.label)
        .unwrap_or("Plain");
    let background = if template.background_type().is_known() {
        background.to_string()
    } else {
        format!("{} (shown as {})", template.background_type(), background)
    };

    println!("descriptor:  {}", descriptor);
    println!("size:        {}", size);
    println!("color:       {}", template.background_color());
    println!("background:  {}", background);
    println!("copy last:   {}", template.is_copy_last_page_settings());
    Ok(())
}

// ============================================================================
// set
// ============================================================================

fn cmd_set(
    store: FileSettingsStore,
    width: Option<f64>,
    height: Option<f64>,
    color: Option<String>,
    background: Option<Background>,
    copy_last: Option<bool>,
) -> Result<(), CliError> {
    let mut editor = TemplateEditor::open(store);

    if width.is_some() || height.is_some() {
        let w = width.unwrap_or(editor.template().page_width());
        let h = height.unwrap_or(editor.template().page_height());
        editor
            .template_mut()
            .set_page_size(w, h)
            .map_err(|e| CliError::value(e.to_string()))?;
    }

    if let Some(token) = color {
        let color = Color::parse_token(&token).ok_or_else(|| {
            CliError::value(format!("invalid color '{}'", token)).with_hint("use #RRGGBB, e.g. #FFFFFF")
        })?;
        editor.template_mut().set_background_color(color);
    }

    if let Some(bg) = background {
        editor
            .select_background(bg.choice_index())
            .map_err(|e| CliError::value(e.to_string()))?;
    }

    if let Some(copy) = copy_last {
        editor.template_mut().set_copy_last_page_settings(copy);
    }

    editor.apply()?;
    println!("{}", serialize(editor.template()));
    Ok(())
}

// ============================================================================
// save / load
// ============================================================================

fn cmd_save(store: FileSettingsStore, path: Option<PathBuf>) -> Result<(), CliError> {
    let mut editor = TemplateEditor::open(store);
    let path = match path {
        Some(p) => with_template_extension(&p),
        None => editor.default_save_path(),
    };

    editor.save_file(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_load(store: FileSettingsStore, path: PathBuf) -> Result<(), CliError> {
    let mut editor = TemplateEditor::open(store);
    editor.load_file(&path).map_err(|e| {
        CliError::from(e).with_hint("template files have the .xojt extension")
    })?;
    editor.apply()?;
    println!("{}", serialize(editor.template()));
    Ok(())
}

// ============================================================================
// units / format
// ============================================================================

fn cmd_units(store: FileSettingsStore) -> Result<(), CliError> {
    let current = store.size_unit_index();
    for (i, unit) in UnitTable::standard().entries().iter().enumerate() {
        let marker = if i == current { "*" } else { " " };
        println!("{} {}  {:<3} {:.4}pt", marker, i, unit.name, unit.scale);
    }
    Ok(())
}

fn cmd_format(store: FileSettingsStore, length: f64, unit: Option<usize>) -> Result<(), CliError> {
    let table = UnitTable::standard();
    let index = unit.unwrap_or_else(|| store.size_unit_index());
    let text = table.try_format(length, index).ok_or_else(|| {
        CliError::args(format!("unit index {} out of range", index))
            .with_hint(format!("valid indices: 0..{}; see `xojt units`", table.len()))
    })?;
    println!("{}", text);
    Ok(())
}
