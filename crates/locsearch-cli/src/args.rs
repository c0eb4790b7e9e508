use clap::{Parser, Subcommand};

/// CLI arguments for locsearch
#[derive(Debug, Parser)]
#[command(
    name = "locsearch",
    version,
    about = "Search and inspect the bundled countries/states/cities dataset"
)]
pub struct CliArgs {
    /// Path to a dataset file (.json, .json.gz or .bin); defaults to the
    /// dataset bundled with locsearch-core
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Optional comma-separated list of ISO2 country codes to load (e.g. RO,DE)
    #[arg(short = 'f', long = "filter", global = true)]
    pub filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// List all countries
    Countries,

    /// Lookup a country by ISO2 or ISO3 code
    Country {
        /// ISO2 or ISO3 code (e.g. RO, ROU)
        code: String,
    },

    /// List all states for a given country
    States {
        /// ISO2 code of the country
        iso2: String,
    },

    /// List cities containing a substring, with their ancestry
    Cities {
        /// Substring to search (case-insensitive)
        query: String,
    },

    /// Ranked search across countries, states and cities
    Search {
        /// Query text (minimum 2 characters)
        query: String,

        /// Maximum number of results
        #[arg(short = 'l', long = "limit", default_value_t = locsearch_core::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Map-ready suggestions for a query, plus the viewport the top hit
    /// would focus
    Suggest {
        /// Query text (minimum 2 characters)
        query: String,
    },

    /// Compile the dataset into the binary cache format
    Compile {
        /// Output path (conventionally .bin)
        output: String,
    },
}
