use chrono::NaiveDate;

use crate::models::{Column, Direction};
use crate::services::history_service::{self, render_history};
use crate::session::{Reply, Session, View};

fn column_list() -> String {
    Column::ALL
        .iter()
        .map(|c| c.key())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_column(value: &str) -> Result<Column, String> {
    Column::parse(value)
        .ok_or_else(|| format!("Unknown column '{}'. Columns: {}", value, column_list()))
}

/// Fetch the full collection, then render it through the current filters
///
/// On failure the previous snapshot stays in place.
pub async fn open(session: &mut Session, reply: &mut Reply) -> Result<(), String> {
    session.view = View::History;
    let rows = history_service::load_snapshot(&session.client).await?;
    session.snapshot = rows;
    render(session, reply);
    Ok(())
}

pub fn render(session: &Session, reply: &mut Reply) {
    reply.text(render_history(&session.history, &session.snapshot, session.page_size));
}

pub async fn execute(
    session: &mut Session,
    reply: &mut Reply,
    command: &str,
    args: &str,
) -> Result<(), String> {
    match command {
        "reload" => return open(session, reply).await,
        "search" => session.history.set_search(args),
        "date" => {
            let date = match args.to_lowercase().as_str() {
                "" | "all" | "clear" => None,
                value => {
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD or `date clear`", args))?;
                    Some(date.format("%Y-%m-%d").to_string())
                }
            };
            session.history.set_date(date);
        }
        "direction" | "dir" => {
            let direction = match args.to_lowercase().as_str() {
                "" | "all" => None,
                value => Some(
                    Direction::parse(value)
                        .ok_or_else(|| format!("Invalid direction '{}'. Use Buy, Sell or All", args))?,
                ),
            };
            session.history.set_direction(direction);
        }
        "filter" => {
            if args.is_empty() {
                return Err(format!(
                    "Usage: `filter <column> [text]`. Columns: {}",
                    column_list()
                ));
            }
            let (column, pattern) = match args.split_once(char::is_whitespace) {
                Some((column, pattern)) => (column, pattern.trim()),
                None => (args, ""),
            };
            let column = parse_column(column)?;
            session.history.set_column_filter(column, pattern);
        }
        "sort" => {
            if args.is_empty() {
                return Err(format!("Usage: `sort <column>`. Columns: {}", column_list()));
            }
            let column = parse_column(args)?;
            session.history.toggle_sort(column);
        }
        "page" => {
            let page: usize = args
                .parse()
                .map_err(|_| "Invalid page number. Use: `page 2`".to_string())?;
            session.history.page = page.max(1);
        }
        "next" => session.history.page += 1,
        "prev" => session.history.page = session.history.page.saturating_sub(1).max(1),
        "reset" => session.history.reset(),
        _ => return Err(format!("Unknown history command '{}'", command)),
    }

    // Keep the stored page inside the range the table can show
    let matching = session.history.apply(&session.snapshot).len();
    let page = crate::utils::Page::new(matching, session.page_size, session.history.page);
    session.history.page = page.current_page;

    session.view = View::History;
    render(session, reply);
    Ok(())
}
