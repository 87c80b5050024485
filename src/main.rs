use clap::{Parser, Subcommand, ValueEnum};
use pwa_assets::config::{self, MetaConfig, RawConfig};
use pwa_assets::fingerprint::{HashFunction, md5_hex, sha256_hex};
use pwa_assets::generate::{self, PwaGenerator};
use pwa_assets::output;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pwa-assets")]
#[command(about = "Generate PWA icons, manifest and browser config from one base icon")]
#[command(long_about = "\
Generate PWA icons, manifest and browser config from one base icon

Reads a config file (TOML, or JSON such as a package.json with a
\"pwaManifest\" block), renders every icon, writes them together with
manifest.webmanifest and browserconfig.xml to the output directory, and
injects the matching <link>/<meta> tags into the configured HTML files.

Outputs:

  dist/
  ├── icon-192x192.1a2b3c4d.png     # Default icons, one per size and format
  ├── icon-192x192.5e6f7a8b.webp
  ├── favicon-32x32.….png           # With genFavicons = true
  ├── apple-touch-icon.….png        # 180x180, padded and flattened
  ├── mstile-70x70.….png            # Microsoft tiles (70, 150, 310, 310x150)
  ├── manifest.webmanifest
  └── browserconfig.xml

Relative paths in the config (insertInto, icons.baseIcon) resolve against
the config file's directory.

Run 'pwa-assets gen-config' to generate a documented pwa.toml.")]
#[command(version)]
struct Cli {
    /// Config file (.toml, or JSON)
    #[arg(long, default_value = "pwa.toml", global = true)]
    config: PathBuf,

    /// Key of the options block inside a JSON config (e.g. package.json)
    #[arg(long, default_value = "pwaManifest", global = true)]
    key: String,

    /// Public URL prefix for generated assets
    #[arg(long, default_value = "/", global = true)]
    base_url: String,

    /// Build environment; selects the matching override block
    #[arg(long, env = "NODE_ENV", global = true)]
    env: Option<String>,

    /// Hash used for filename fingerprints
    #[arg(long, value_enum, default_value_t = HashAlgorithm::Md5, global = true)]
    hash: HashAlgorithm,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum HashAlgorithm {
    Md5,
    Sha256,
}

impl HashAlgorithm {
    fn function(self) -> HashFunction {
        match self {
            HashAlgorithm::Md5 => Box::new(md5_hex),
            HashAlgorithm::Sha256 => Box::new(sha256_hex),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render all assets, write them to the output directory and inject HTML
    Generate {
        /// Output directory for icons, manifest and browser config
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
    /// Validate the config without rendering anything
    Check,
    /// Print a stock pwa.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Generate { out_dir } => {
            let raw = config::load_raw_config(&cli.config, &cli.key)?;
            let generator = PwaGenerator::new(&raw.options, &meta_config(&cli), raw.fallback.as_ref())?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_generation_event(&event) {
                        println!("{}", line);
                    }
                }
            });

            let mut generator = generator.with_events(tx);
            generator.set_hash_function(cli.hash.function());
            let result = generator.generate();
            let manifest = generator.manifest().cloned();
            // Closes the event channel so the printer finishes
            drop(generator);
            printer.join().map_err(|_| "event printer panicked")?;

            let Some(generation) = result? else {
                println!("PWA generation is disabled; nothing written");
                return Ok(());
            };
            let manifest = manifest.ok_or("manifest was not assembled")?;
            generate::write_outputs(out_dir, &generation, &manifest)?;
            println!();
            output::print_generation_summary(&generation, manifest.icons.len(), out_dir);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let RawConfig { options, fallback } = config::load_raw_config(&cli.config, &cli.key)?;
            let resolved = config::resolve(&options, &meta_config(&cli), fallback.as_ref())?;
            output::print_check_output(&resolved);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Host context: paths resolve against the config file's directory.
fn meta_config(cli: &Cli) -> MetaConfig {
    let resolve_dir = cli
        .config
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let meta = MetaConfig::new(resolve_dir, cli.base_url.clone());
    match &cli.env {
        Some(env) => meta.with_environment(env.clone()),
        None => meta,
    }
}
