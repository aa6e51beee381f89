//! CLI 模块

pub mod auth;
pub mod tasks;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use crate::client::TaskApi;
use crate::error::Result;
use crate::session::SessionContext;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(version)]
#[command(about = "Terminal client for a task-list server")]
pub struct Cli {
    /// Server base URL (overrides TASKPAD_SERVER and config.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive TUI (default)
    Tui,
    /// Log in and store the access token
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// List tasks
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change a task's title and/or description
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Flip a task between done and pending
    Toggle { id: i64 },
    /// Delete a task
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show server and login status
    Status,
}

/// 执行非 TUI 子命令，输出写到 stdout
pub fn execute(
    command: Commands,
    session: &SessionContext,
    api: &dyn TaskApi,
    server_url: &str,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    match command {
        // main 负责启动 TUI
        Commands::Tui => Ok(()),
        Commands::Login { username } => {
            auth::login(session, api, username, &mut input, &mut out)
        }
        Commands::Logout => auth::logout(session, &mut out),
        Commands::Status => auth::status(session, server_url, &mut out),
        Commands::List { json } => tasks::list(session, api, json, &mut out),
        Commands::Add { title, description } => {
            tasks::add(session, api, &title, &description, &mut out)
        }
        Commands::Edit {
            id,
            title,
            description,
        } => tasks::edit(
            session,
            api,
            id,
            title.as_deref(),
            description.as_deref(),
            &mut out,
        ),
        Commands::Toggle { id } => tasks::toggle(session, api, id, &mut out),
        Commands::Rm { id, yes } => tasks::remove(session, api, id, yes, &mut input, &mut out),
    }
}

/// 读取一行输入（去掉换行）
pub(crate) fn prompt_line(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// y/N 确认，默认 No
pub(crate) fn confirm(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    let answer = prompt_line(input, out, &format!("{} [y/N] ", prompt))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
