use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use letter_icon::{FontCatalog, IconFormat, OptionsProfile, RenderRequest, RendererFactory};

#[derive(Parser, Debug)]
#[command(name = "letter-icon", version, about = "Render a letter icon to a file or stdout", long_about = None)]
struct Cli {
    /// Letters to draw on the icon
    #[arg(short, long)]
    text: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum)]
    format: Option<IconFormat>,

    /// Edge length in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JSON options profile; flags override its values
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Background color (hex or name)
    #[arg(long)]
    background: Option<String>,

    /// Text color (hex or name)
    #[arg(long)]
    foreground: Option<String>,

    /// Font family
    #[arg(long)]
    font: Option<String>,
}

impl Cli {
    fn profile(&self) -> Result<OptionsProfile, Box<dyn Error>> {
        let mut profile = match &self.config {
            Some(path) => OptionsProfile::from_json(&std::fs::read_to_string(path)?)?,
            None => OptionsProfile::new(),
        };

        if let Some(format) = self.format {
            profile.format = Some(format);
        }
        if let Some(size) = self.size {
            profile.default_size = Some(size);
        }
        if let Some(background) = &self.background {
            profile.default_background = Some(background.clone());
        }
        if let Some(foreground) = &self.foreground {
            profile.default_foreground = Some(foreground.clone());
        }
        if let Some(font) = &self.font {
            profile.font_name = Some(font.clone());
        }
        Ok(profile)
    }
}

/// `RUST_LOG`-style directives, or warnings only when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout can carry the icon.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();
    let fonts = FontCatalog::system();
    let options = cli.profile()?.build(&fonts)?;

    let renderer = RendererFactory::new(fonts).create(RenderRequest::from_options(&options, cli.text.clone()));
    let bytes = renderer.render()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), format = %renderer.format(), "wrote icon");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
