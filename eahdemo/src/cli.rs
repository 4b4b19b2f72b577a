//! Command-line interface definition and parsing.

use clap::{Parser, Subcommand};
use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    str::FromStr,
};

/// Browse auctions and buy subscriptions against an EAuctionsHub backend.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// The subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demonstration backend over fixture data
    Serve {
        /// The HMAC secret for verification of JWT claims.
        #[arg(short, long, env = "APP_SECRET")]
        secret: String,

        /// A JSON file of auctions and plans to serve instead of the built-in set
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },

    /// List the auctions for a city and asset type, page by page
    Auctions {
        /// The city id
        #[arg(long)]
        city: String,

        /// The asset type id
        #[arg(long)]
        asset_type: String,

        /// How many pages to load at most (0 loads every page)
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// List the subscription plans
    Plans,

    /// Manage the stored bearer token
    Token {
        /// The token operation
        #[command(subcommand)]
        action: TokenCommand,
    },

    /// Buy a subscription plan through the console checkout
    Purchase {
        /// The id of the plan to buy
        plan: String,

        /// Buyer name, pre-filled into the checkout
        #[arg(long, default_value = "")]
        name: String,

        /// Buyer email
        #[arg(long, default_value = "")]
        email: String,

        /// Buyer phone number
        #[arg(long, default_value = "")]
        contact: String,
    },

    /// Write the JSON schema of the API payloads
    Schema {
        /// The output file ("-" implies stdout)
        #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
        output: PathOrStd,
    },
}

/// Operations on the stored bearer token.
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Store a token
    Set {
        /// The raw token
        token: String,
    },
    /// Print the stored token
    Show,
    /// Forget the stored token
    Clear,
    /// Mint a token accepted by `serve` and store it
    Issue {
        /// The HMAC secret the server verifies with
        #[arg(short, long, env = "APP_SECRET")]
        secret: String,

        /// The subscriber the token identifies
        #[arg(long)]
        subject: String,

        /// How many days the token stays valid
        #[arg(long, default_value_t = 30)]
        days: u64,
    },
}

/// A file path, or "-" for standard output.
#[derive(Clone, Debug)]
pub enum PathOrStd {
    /// A file
    Path(PathBuf),
    /// Standard output
    Std,
}

impl PathOrStd {
    /// Open for writing.
    pub fn write(&self) -> std::io::Result<Box<dyn Write>> {
        match self {
            Self::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            Self::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}
