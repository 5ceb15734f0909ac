use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use khata_core::{CropBox, ProfileSet};
use khata_pdf::Renderer;

mod extract;
mod inspect;
mod output;

#[derive(Parser, Debug)]
#[command(
    name = "khata",
    version,
    about = "Extract transactions from Indian bank and credit-card statement PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from one or more statement PDFs into CSV
    Extract {
        /// Statement PDF(s), processed in the order given
        #[arg(required = true)]
        pdf: Vec<PathBuf>,

        /// Password for encrypted statements
        #[arg(long)]
        password: Option<String>,

        /// Force a profile key (skips auto-detection)
        #[arg(long)]
        profile: Option<String>,

        /// Crop box override as "x0,y0,x1,y1" (page points, y from the top)
        #[arg(long, value_parser = parse_cropbox)]
        cropbox: Option<CropBox>,

        /// Profile catalog TOML (default: the built-in catalog)
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Output CSV path; "-" for stdout
        #[arg(long, short, default_value = "transactions.csv")]
        output: PathBuf,

        /// Sort records by date before writing (default keeps page order)
        #[arg(long)]
        sort_by_date: bool,
    },

    /// Show page text (optionally cropped) to help author a profile
    Inspect {
        pdf: PathBuf,

        #[arg(long)]
        password: Option<String>,

        /// Crop box as "x0,y0,x1,y1" (page points, y from the top)
        #[arg(long, value_parser = parse_cropbox)]
        cropbox: Option<CropBox>,

        /// Page to inspect (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List the profiles in the catalog
    Profiles {
        /// Profile catalog TOML (default: the built-in catalog)
        #[arg(long)]
        profiles: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            pdf,
            password,
            profile,
            cropbox,
            profiles,
            output,
            sort_by_date,
        } => {
            let set = load_profiles(profiles.as_deref())?;
            let renderer = Renderer::new()?;
            let opts = extract::Options {
                password: password.as_deref(),
                profile_key: profile.as_deref(),
                crop_override: cropbox,
            };

            let mut records = Vec::new();
            let mut errors = Vec::new();
            let mut date_format: Option<String> = None;
            let mut failed = 0usize;

            for path in &pdf {
                match extract::run(&renderer, path, &set, &opts) {
                    Ok(outcome) => {
                        println!(
                            "{}: {} statement, {} transaction(s), {} line(s) skipped",
                            path.display(),
                            outcome.profile_name,
                            outcome.records.len(),
                            outcome.errors.len()
                        );
                        date_format.get_or_insert(outcome.date_output_format);
                        records.extend(outcome.records);
                        errors.extend(outcome.errors);
                    }
                    Err(e) => {
                        eprintln!("{}: {:#}", path.display(), e);
                        failed += 1;
                    }
                }
            }

            if failed == pdf.len() {
                bail!("all {} statement(s) failed", pdf.len());
            }

            if sort_by_date {
                records.sort_by_key(|r| r.date);
            }

            let date_format = date_format.unwrap_or_else(|| "%Y-%m-%d".to_string());
            output::write_csv(&records, &date_format, &output)?;
            if output != PathBuf::from("-") {
                println!("Wrote {} transaction(s) to {}", records.len(), output.display());
            }

            if !errors.is_empty() {
                eprintln!("Skipped {} line(s):", errors.len());
                for error in &errors {
                    eprintln!("  {error}");
                }
            }

            if failed > 0 {
                bail!("{failed} of {} statement(s) failed", pdf.len());
            }
        }

        Command::Inspect {
            pdf,
            password,
            cropbox,
            page,
        } => {
            let renderer = Renderer::new()?;
            inspect::run(&renderer, &pdf, password.as_deref(), cropbox, page)?;
        }

        Command::Profiles { profiles } => {
            let set = load_profiles(profiles.as_deref())?;
            for (key, profile) in set.all() {
                let c = profile.crop_box;
                println!(
                    "{key:8} {:20} crop=[{},{},{},{}] identifier={:?}",
                    profile.name, c.x0, c.y0, c.x1, c.y1, profile.identifier
                );
            }
        }
    }

    Ok(())
}

fn load_profiles(path: Option<&std::path::Path>) -> Result<ProfileSet> {
    match path {
        Some(p) => {
            ProfileSet::from_path(p).with_context(|| format!("loading profiles from {}", p.display()))
        }
        None => ProfileSet::builtin().context("loading built-in profiles"),
    }
}

/// Parse "x0,y0,x1,y1" (as printed by `khata inspect`) into a crop box.
fn parse_cropbox(s: &str) -> Result<CropBox, String> {
    let coords: Vec<f32> = s
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| "crop box values must be numbers".to_string())?;
    let [x0, y0, x1, y1] = coords[..] else {
        return Err("crop box must have exactly 4 values: \"x0,y0,x1,y1\"".to_string());
    };
    CropBox::checked(x0, y0, x1, y1).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cropbox() {
        let crop = parse_cropbox("10,422,430,675").unwrap();
        assert_eq!(crop, CropBox::checked(10.0, 422.0, 430.0, 675.0).unwrap());

        let crop = parse_cropbox(" 10, 422, 430, 675 ").unwrap();
        assert_eq!(crop.x1, 430.0);

        assert!(parse_cropbox("10,422,430").is_err());
        assert!(parse_cropbox("10,422,430,675,9").is_err());
        assert!(parse_cropbox("a,b,c,d").is_err());
        // Inverted rectangle.
        assert!(parse_cropbox("430,422,10,675").is_err());
    }
}
