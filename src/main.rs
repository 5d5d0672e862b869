use clap::Parser;
use colored::Colorize;
use eyre::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;
use todostore::{NewTask, Task, TaskEvent, TaskOps, TaskPatch, TaskStore};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "Interactive client for the in-memory task store")]
#[command(version)]
struct Cli {
    /// Start with a few sample tasks
    #[arg(long)]
    seed: bool,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // The composition root owns the store; everything else gets a handle.
    let store = Arc::new(TaskStore::new());
    let ops = TaskOps::new(store);

    if cli.seed {
        let created = ops.seed_samples()?;
        println!("Seeded {} sample tasks.", created.len());
    }

    println!("todostore — type 'help' for commands.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "add" => match ops.create(NewTask::titled(rest)) {
                Ok((task, event)) => {
                    println!("Added {}", render(&task));
                    print_event(&event);
                }
                Err(err) => println!("{} {}", "error:".red(), err),
            },
            "list" => {
                let tasks = ops.list();
                if tasks.is_empty() {
                    println!("No tasks.");
                }
                for (i, task) in tasks.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, render(task));
                }
            }
            "done" => complete(&ops, rest, true),
            "undone" => complete(&ops, rest, false),
            "edit" => {
                let (index, title) = match rest.split_once(char::is_whitespace) {
                    Some((n, t)) => (n, t),
                    None => {
                        println!("{} usage: edit <n> <new title>", "error:".red());
                        continue;
                    }
                };
                let Some(task) = nth(&ops, index) else {
                    continue;
                };
                let patch = TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                };
                match ops.update(&task.id, patch) {
                    Ok((task, event)) => {
                        println!("Updated {}", render(&task));
                        print_event(&event);
                    }
                    Err(err) => println!("{} {}", "error:".red(), err),
                }
            }
            "rm" => {
                let Some(task) = nth(&ops, rest) else {
                    continue;
                };
                let (deleted, event) = ops.delete(&task.id);
                if deleted {
                    println!("Deleted '{}'", task.title);
                }
                if let Some(event) = event {
                    print_event(&event);
                }
            }
            "search" => match ops.search(rest) {
                Ok(hits) => {
                    println!("{} match(es):", hits.len());
                    for task in &hits {
                        println!("     {}", render(task));
                    }
                }
                Err(err) => println!("{} {}", "error:".red(), err),
            },
            "move" => {
                let (from, to) = match rest.split_once(char::is_whitespace) {
                    Some((a, b)) => (a, b.trim()),
                    None => {
                        println!("{} usage: move <from> <to>", "error:".red());
                        continue;
                    }
                };
                match move_task(&ops, from, to) {
                    Some(event) => print_event(&event),
                    None => continue,
                }
            }
            "stats" => print_stats(&ops),
            "quit" | "exit" => break,
            other => println!("{} unknown command '{}', try 'help'", "error:".red(), other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  add <title>        create a task");
    println!("  list               show all tasks in order");
    println!("  done <n>           mark task n complete");
    println!("  undone <n>         mark task n pending");
    println!("  edit <n> <title>   retitle task n");
    println!("  rm <n>             delete task n");
    println!("  search <query>     match titles, categories, tags");
    println!("  move <from> <to>   reorder: move task to a new slot");
    println!("  stats              show aggregate statistics");
    println!("  quit               leave");
}

/// Resolve a 1-based listing index to a task.
fn nth(ops: &TaskOps, arg: &str) -> Option<Task> {
    let index: usize = match arg.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("{} expected a task number, got '{}'", "error:".red(), arg);
            return None;
        }
    };
    let task = ops.list().into_iter().nth(index - 1);
    if task.is_none() {
        println!("{} no task number {}", "error:".red(), index);
    }
    task
}

fn complete(ops: &TaskOps, arg: &str, completed: bool) {
    let Some(task) = nth(ops, arg) else {
        return;
    };
    let patch = TaskPatch {
        completed: Some(completed),
        ..TaskPatch::default()
    };
    match ops.update(&task.id, patch) {
        Ok((task, event)) => {
            println!("Updated {}", render(&task));
            print_event(&event);
        }
        Err(err) => println!("{} {}", "error:".red(), err),
    }
}

/// Rebuild the full ordering with one task moved, then reorder the store.
fn move_task(ops: &TaskOps, from: &str, to: &str) -> Option<TaskEvent> {
    let tasks = ops.list();
    let from_idx: usize = match from.parse::<usize>() {
        Ok(n) if (1..=tasks.len()).contains(&n) => n - 1,
        _ => {
            println!("{} bad source number '{}'", "error:".red(), from);
            return None;
        }
    };
    let to_idx: usize = match to.parse::<usize>() {
        Ok(n) if (1..=tasks.len()).contains(&n) => n - 1,
        _ => {
            println!("{} bad target number '{}'", "error:".red(), to);
            return None;
        }
    };

    let mut ids: Vec<String> = tasks.into_iter().map(|t| t.id).collect();
    let id = ids.remove(from_idx);
    ids.insert(to_idx, id);
    Some(ops.reorder(ids))
}

fn print_event(event: &TaskEvent) {
    // Stand-in for the push channel: print the payload a transport would carry.
    let payload = serde_json::to_string(event).unwrap_or_else(|_| event.kind().to_string());
    println!("{}", format!("  event: {}", payload).dimmed());
}

fn print_stats(ops: &TaskOps) {
    let stats = ops.statistics();
    println!("Total:      {}", stats.total);
    println!("Completed:  {}", stats.completed);
    println!("Pending:    {}", stats.pending);
    println!("Rate:       {:.2}%", stats.completion_rate);
    println!("Due today:  {}", stats.due_today);
    println!(
        "Overdue:    {}",
        if stats.overdue > 0 {
            stats.overdue.to_string().red().to_string()
        } else {
            stats.overdue.to_string()
        }
    );
    if !stats.by_priority.is_empty() {
        let mut by_priority: Vec<_> = stats.by_priority.iter().collect();
        by_priority.sort();
        println!(
            "Priority:   {}",
            by_priority
                .iter()
                .map(|(p, n)| format!("{} {}", p, n))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !stats.by_category.is_empty() {
        let mut by_category: Vec<_> = stats.by_category.iter().collect();
        by_category.sort();
        println!(
            "Category:   {}",
            by_category
                .iter()
                .map(|(c, n)| format!("{} {}", c, n))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

fn render(task: &Task) -> String {
    let mark = if task.completed {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let priority = match task.priority.as_str() {
        "high" => task.priority.red().to_string(),
        "low" => task.priority.blue().to_string(),
        _ => task.priority.yellow().to_string(),
    };
    let mut line = format!("{} {} ({})", mark, task.title, priority);
    if let Some(category) = &task.category {
        line.push_str(&format!(" #{}", category));
    }
    if !task.tags.is_empty() {
        line.push_str(&format!(" [{}]", task.tags.join(", ")));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", due.date_naive()));
    }
    line
}
