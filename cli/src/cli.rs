use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use techops_business::{UserQuery, UserStatus};

#[derive(Parser)]
#[command(name = "techops")]
#[command(about = "User administration for the techops service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the techops API (overrides env and config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Rows per page (overrides env and config file)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users, one page at a time
    List {
        /// Page to show (1-based)
        #[arg(long, short = 'p', default_value = "1")]
        page: u32,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Browse users interactively (default)
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Enable or disable a user
    Status {
        /// User ID
        id: i64,

        /// Email shown in the confirmation
        #[arg(long, short = 'e', default_value = "")]
        email: String,

        /// The user is currently disabled (so it will be enabled)
        #[arg(long)]
        disabled: bool,

        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Unlock a locked user
    Unlock {
        /// User ID
        id: i64,

        /// Email shown in the confirmation
        #[arg(long, short = 'e', default_value = "")]
        email: String,

        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Add a user (prompts for missing fields)
    Add {
        #[arg(long, short = 'e')]
        email: Option<String>,

        #[arg(long, short = 'n')]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Show or update the saved configuration
    Config {
        /// Save this API base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Save this page size
        #[arg(long)]
        set_page_size: Option<u32>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// List filter shared by `list` and `browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by user ID
    #[arg(long)]
    pub id: Option<i64>,

    /// Filter by email
    #[arg(long)]
    pub email: Option<String>,

    /// Filter by name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Filter by status
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Enabled,
    Disabled,
}

impl From<StatusArg> for UserStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Enabled => Self::Enabled,
            StatusArg::Disabled => Self::Disabled,
        }
    }
}

impl FilterArgs {
    /// `None` when no filter field was given.
    pub fn into_query(self) -> Option<UserQuery> {
        let query = UserQuery {
            id: self.id,
            email: non_blank(self.email),
            name: non_blank(self.name),
            phone: non_blank(self.phone),
            status: self.status.map(UserStatus::from),
        };
        (!query.is_empty()).then_some(query)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
