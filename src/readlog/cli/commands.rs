use super::logger;
use super::render::{print_columns, print_config, print_messages, print_stats};
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use readlog::api::{ConfigAction, ReadlogApi};
use readlog::error::{ReadlogError, Result};
use readlog::init::{data_dir, initialize};
use readlog::model::{current_month_year, parse_month, NewBook, Status};
use readlog::store::fs::FileStore;

const DEFAULT_TERM_WIDTH: usize = 80;

struct AppContext {
    api: ReadlogApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            status,
            month,
            year,
        }) => handle_add(&mut ctx, title, author, &status, month, year),
        Some(Commands::List { status, more }) => handle_list(&ctx, status, more),
        Some(Commands::Move { id, status }) => handle_move(&mut ctx, id, &status),
        Some(Commands::Rename { id, title }) => handle_rename(&mut ctx, id, title),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Stats { year, author }) => handle_stats(&ctx, year, author),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, 0),
    }
}

fn init_context() -> Result<AppContext> {
    let api = initialize(data_dir()?);
    Ok(AppContext { api })
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    author: String,
    status: &str,
    month: Option<String>,
    year: Option<i32>,
) -> Result<()> {
    let status: Status = status.parse()?;
    if !status.is_completed() && (month.is_some() || year.is_some()) {
        return Err(ReadlogError::Api(format!(
            "--month and --year only apply to completed books; {} books are dated now",
            status
        )));
    }

    let (this_month, this_year) = current_month_year();
    let month = match month {
        Some(m) => parse_month(&m)?,
        None => this_month,
    };
    let year = year.unwrap_or(this_year);

    if status.is_completed() && (year, month) > (this_year, this_month) {
        return Err(ReadlogError::Api(
            "A completed book cannot be finished in the future".into(),
        ));
    }

    let result = ctx
        .api
        .create_book(NewBook::new(title, author, status, month, year))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, status: Option<String>, more: usize) -> Result<()> {
    let only = status.map(|s| s.parse::<Status>()).transpose()?;
    let result = ctx.api.list_books(only, more)?;
    print_columns(&result.columns);
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, id: u64, status: &str) -> Result<()> {
    let status: Status = status.parse()?;
    let result = ctx.api.change_status(id, status)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, id: u64, title: Vec<String>) -> Result<()> {
    let result = ctx.api.edit_title(id, &title.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<u64>) -> Result<()> {
    for id in ids {
        let result = ctx.api.delete_book(id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_stats(ctx: &AppContext, year: Option<i32>, author: Option<String>) -> Result<()> {
    let result = ctx.api.stats(year, author.as_deref())?;
    if let Some(stats) = &result.stats {
        print_stats(stats, term_width());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (Some(key), Some(value)) => ConfigAction::Set { key, value },
        (key, _) => ConfigAction::Show(key),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn term_width() -> usize {
    let term = Term::stdout();
    if !term.is_term() {
        return DEFAULT_TERM_WIDTH;
    }
    match term.size_checked() {
        Some((_, cols)) => cols as usize,
        None => DEFAULT_TERM_WIDTH,
    }
}
