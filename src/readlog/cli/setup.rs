use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "readlog", bin_name = "readlog", version)]
#[command(about = "Keep track of what you read, are reading and want to read", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    #[command(alias = "a")]
    Add {
        /// Title of the book
        title: String,

        /// Author of the book
        author: String,

        /// Column to file it under: to-read, reading or completed
        #[arg(short, long, default_value = "to-read")]
        status: String,

        /// Month it was finished (1-12 or a name), completed books only; defaults to this month
        #[arg(short, long)]
        month: Option<String>,

        /// Year it was finished, completed books only; defaults to this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// List books by status
    #[command(alias = "ls")]
    List {
        /// Only show one column: to-read, reading or completed
        #[arg(short, long)]
        status: Option<String>,

        /// Show this many extra pages per column
        #[arg(long, default_value_t = 0)]
        more: usize,
    },

    /// Move a book to another status
    #[command(alias = "mv")]
    Move {
        /// Id of the book
        id: u64,

        /// New status: to-read, reading or completed
        status: String,
    },

    /// Change a book's title
    Rename {
        /// Id of the book
        id: u64,

        /// New title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete one or more books
    #[command(alias = "rm")]
    Delete {
        /// Ids of the books (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Books completed per month, as a chart
    #[command(alias = "graph")]
    Stats {
        /// Year to show; defaults to this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Only count books by this author
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Rebuild derived statistics from the book list
    Doctor,

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, author-cleanup)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cli = Cli::try_parse_from([
            "readlog", "add", "Dune", "Herbert", "-s", "completed", "-m", "june", "-y", "2024",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                author,
                status,
                month,
                year,
            }) => {
                assert_eq!(title, "Dune");
                assert_eq!(author, "Herbert");
                assert_eq!(status, "completed");
                assert_eq!(month.as_deref(), Some("june"));
                assert_eq!(year, Some(2024));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_aliases() {
        let cli = Cli::try_parse_from(["readlog", "mv", "3", "reading"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Move { id: 3, .. })));

        let cli = Cli::try_parse_from(["readlog", "rm", "1", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { ids }) if ids == vec![1, 2]));

        let cli = Cli::try_parse_from(["readlog", "graph", "-y", "2023"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats { year: Some(2023), .. })));
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["readlog", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["readlog", "delete", "dune"]).is_err());
    }
}
