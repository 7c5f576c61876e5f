//! Command implementations for the GDP CLI.
//!
//! Provides subcommands for extending published quarterly GDP panels and
//! imputing them from annual average growth forecasts.

use clap::Subcommand;

pub mod countries;
pub mod extend;
pub mod impute;

#[derive(Subcommand)]
pub enum Command {
    /// Impute missing quarters through the last forecast year
    Impute {
        /// Published quarterly GDP CSV (`date,<code>,...`, blank cells unobserved)
        #[arg(short = 'p', long)]
        published: String,

        /// Annual average growth forecasts CSV (`year,<code>,...`, fractional rates)
        #[arg(short = 'f', long)]
        forecasts: String,

        /// Output path for the completed quarterly CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Country table CSV (`name,code`); defaults to the built-in list
        #[arg(long)]
        countries: Option<String>,

        /// Restrict to these countries (name or code); may be repeated
        #[arg(long = "country")]
        only: Vec<String>,

        /// Lower bound of the plausible quarterly growth multiplier
        #[arg(long, default_value_t = gdp_impute::selection::PLAUSIBLE_GROWTH_LOWER)]
        lower_bound: f64,

        /// Upper bound of the plausible quarterly growth multiplier
        #[arg(long, default_value_t = gdp_impute::selection::PLAUSIBLE_GROWTH_UPPER)]
        upper_bound: f64,

        /// Write a JSON report of filled years, warnings and failures
        #[arg(long)]
        report: Option<String>,

        /// Exit with an error if any country could not be imputed
        #[arg(long)]
        strict: bool,
    },

    /// Pad the published panel with unobserved quarters through the last forecast year
    Extend {
        /// Published quarterly GDP CSV
        #[arg(short = 'p', long)]
        published: String,

        /// Annual average growth forecasts CSV
        #[arg(short = 'f', long)]
        forecasts: String,

        /// Output path for the extended quarterly CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Country table CSV (`name,code`); defaults to the built-in list
        #[arg(long)]
        countries: Option<String>,
    },

    /// Print the configured countries and their column codes
    Countries {
        /// Country table CSV (`name,code`); defaults to the built-in list
        #[arg(long)]
        countries: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Impute {
            published,
            forecasts,
            output,
            countries,
            only,
            lower_bound,
            upper_bound,
            report,
            strict,
        } => impute::run_impute(&impute::ImputeOptions {
            published,
            forecasts,
            output,
            countries,
            only,
            lower_bound,
            upper_bound,
            report,
            strict,
        }),
        Command::Extend {
            published,
            forecasts,
            output,
            countries,
        } => extend::run_extend(&published, &forecasts, &output, countries.as_deref()),
        Command::Countries { countries } => countries::run_countries(countries.as_deref()),
    }
}
