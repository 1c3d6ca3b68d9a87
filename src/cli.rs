//! CLI module
//!
//! A thin terminal front end for the sync engine: each invocation bootstraps
//! from the remote service, performs one operation, and prints the resulting
//! view. The invariant core lives in the engine and store, not here.

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::engine::Engine;
use crate::gateway::{GatewayConfig, HttpGateway};
use crate::shell::TerminalShell;
use crate::sort::SortKey;
use crate::store::Store;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Remote service URL
    #[arg(short, long, default_value = "http://localhost:3000", env = "NESTLIST_SERVER")]
    server: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every visible list with its tasks and subtasks
    Show,

    /// List management commands
    List {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Subtask management commands
    Sub {
        #[command(subcommand)]
        command: SubCommands,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Create a new list (prompts for a name)
    Add,

    /// Rename a list (prompts for the new name)
    Rename {
        /// List id
        list: String,
    },

    /// Delete a list and everything in it
    Rm {
        /// List id
        list: String,
    },

    /// Toggle a list's visibility
    Toggle {
        /// List id
        list: String,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to a list (prompts for the text)
    Add {
        /// List id
        list: String,
    },

    /// Toggle a task's completion
    Done {
        /// List id
        list: String,
        /// Task id
        task: String,
    },

    /// Delete a task
    Rm {
        /// List id
        list: String,
        /// Task id
        task: String,
    },

    /// Move a task to another list
    Move {
        /// Source list id
        from: String,
        /// Task id
        task: String,
        /// Destination list id
        to: String,
    },

    /// Sort a list's tasks; repeating the same key flips the direction
    Sort {
        /// List id
        list: String,
        /// Sort key
        #[arg(value_enum)]
        key: SortKeyArg,
    },

    /// Remove completed tasks from the local view
    ClearDone {
        /// List id
        list: String,
    },
}

#[derive(Subcommand)]
enum SubCommands {
    /// Add a subtask to a task (prompts for the text)
    Add {
        /// List id
        list: String,
        /// Task id
        task: String,
    },

    /// Toggle a subtask's completion
    Done {
        /// List id
        list: String,
        /// Task id
        task: String,
        /// Subtask id
        sub: String,
    },

    /// Delete a subtask
    Rm {
        /// List id
        list: String,
        /// Task id
        task: String,
        /// Subtask id
        sub: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKeyArg {
    Alphabetical,
    Date,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Alphabetical => SortKey::Alphabetical,
            SortKeyArg::Date => SortKey::Chronological,
        }
    }
}

/// Parses arguments, bootstraps the engine, and runs one command.
pub async fn run() {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    let gateway = HttpGateway::with_config(GatewayConfig {
        base_url: cli.server.clone(),
    });
    let engine = Engine::new(Arc::new(gateway), Arc::new(TerminalShell::new()));

    engine.load().await;

    match cli.command {
        Commands::Show => {}
        Commands::List { command } => match command {
            ListCommands::Add => {
                engine.create_list().await;
            }
            ListCommands::Rename { list } => {
                engine.rename_list(&list).await;
            }
            ListCommands::Rm { list } => {
                engine.delete_list(&list).await;
            }
            ListCommands::Toggle { list } => {
                engine.toggle_list_visibility(&list);
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::Add { list } => {
                engine.add_task(&list).await;
            }
            TaskCommands::Done { list, task } => {
                engine.toggle_task(&list, &task).await;
            }
            TaskCommands::Rm { list, task } => {
                engine.delete_task(&list, &task).await;
            }
            TaskCommands::Move { from, task, to } => {
                engine.move_task(&from, &task, &to);
            }
            TaskCommands::Sort { list, key } => {
                engine.sort_tasks(&list, key.into());
            }
            TaskCommands::ClearDone { list } => {
                engine.clear_completed(&list);
            }
        },
        Commands::Sub { command } => match command {
            SubCommands::Add { list, task } => {
                engine.add_subtask(&list, &task).await;
            }
            SubCommands::Done { list, task, sub } => {
                engine.toggle_subtask(&list, &task, &sub).await;
            }
            SubCommands::Rm { list, task, sub } => {
                engine.delete_subtask(&list, &task, &sub).await;
            }
        },
    }

    print_store(&engine.snapshot());
}

fn print_store(store: &Store) {
    if store.lists().is_empty() {
        println!("{}", "No lists yet.".dimmed());
        return;
    }

    for list in store.lists() {
        let marker = if list.visible { "" } else { " (hidden)" };
        println!(
            "{} {} {}{}",
            list.title.bold(),
            format!("[{}]", list.id).dimmed(),
            format!("({})", list.count).cyan(),
            marker.dimmed(),
        );
        if !list.visible {
            continue;
        }
        let Some(tree) = store.tree(&list.id) else {
            continue;
        };
        for task in &tree.tasks {
            let check = if task.completed {
                "[x]".green().to_string()
            } else {
                "[ ]".to_string()
            };
            println!("  {} {} {}", check, task.text, format!("[{}]", task.id).dimmed());
            for subtask in &task.subtasks {
                let check = if subtask.completed {
                    "[x]".green().to_string()
                } else {
                    "[ ]".to_string()
                };
                println!(
                    "      {} {} {}",
                    check,
                    subtask.text,
                    format!("[{}]", subtask.id).dimmed()
                );
            }
        }
    }
}
