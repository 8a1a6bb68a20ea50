use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tops_application::prelude as flows;
use tops_boundary as json;
use tops_core::{
    api::{ApiError, Params},
    entities::CurrentUser,
    resources::comment::TYPE_NAME,
};
use tops_db_sqlite::Connections;

use crate::config::Config;

/// Comments on delivery service requests
#[derive(Parser, Debug)]
#[command(name = "tops")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of the SQLite database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage comments on delivery service requests
    #[command(subcommand)]
    Comments(CommentsCommand),
}

#[derive(Subcommand, Debug)]
enum CommentsCommand {
    /// List comments
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        caller: Caller,
        #[command(flatten)]
        filter: Filter,
    },

    /// Create a new comment
    Create {
        #[command(flatten)]
        caller: Caller,
        #[command(flatten)]
        body: Body,
    },

    /// Update a comment of the calling user
    Update {
        #[command(flatten)]
        caller: Caller,
        /// Comment id
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        body: Body,
    },

    /// Delete a comment of the calling user
    Delete {
        #[command(flatten)]
        caller: Caller,
        /// Comment id
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
struct Caller {
    /// Id of the user on whose behalf the command is executed
    #[arg(long)]
    user_id: i64,

    /// Name of the user on whose behalf the command is executed
    #[arg(long)]
    user_name: Option<String>,
}

impl From<Caller> for CurrentUser {
    fn from(from: Caller) -> Self {
        let Caller { user_id, user_name } = from;
        CurrentUser::new(user_id, user_name.unwrap_or_default())
    }
}

#[derive(Args, Debug, Default)]
struct Filter {
    /// Only the comment with this id
    #[arg(long)]
    id: Option<i64>,

    /// Only comments of this author id
    #[arg(long)]
    author_id: Option<i64>,

    /// Only comments of this author name
    #[arg(long)]
    author: Option<String>,

    /// Only comments on this delivery service request
    #[arg(long)]
    request_id: Option<i64>,

    /// Order by one of: id, authorId, author, deliveryServiceRequestId
    #[arg(long)]
    orderby: Option<String>,

    /// Sort order: asc or desc
    #[arg(long)]
    sort_order: Option<String>,

    /// Maximum number of comments, -1 for unlimited
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Number of comments to skip, requires --limit
    #[arg(long)]
    offset: Option<i64>,

    /// Page of comments to show, requires --limit
    #[arg(long)]
    page: Option<i64>,
}

impl From<Filter> for Params {
    fn from(from: Filter) -> Self {
        let Filter {
            id,
            author_id,
            author,
            request_id,
            orderby,
            sort_order,
            limit,
            offset,
            page,
        } = from;
        [
            ("id", id.map(|v| v.to_string())),
            ("authorId", author_id.map(|v| v.to_string())),
            ("author", author),
            ("deliveryServiceRequestId", request_id.map(|v| v.to_string())),
            ("orderby", orderby),
            ("sortOrder", sort_order),
            ("limit", limit.map(|v| v.to_string())),
            ("offset", offset.map(|v| v.to_string())),
            ("page", page.map(|v| v.to_string())),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect()
    }
}

#[derive(Args, Debug)]
struct Body {
    /// Comment as JSON, e.g. '{"deliveryServiceRequestId":1,"value":"LGTM"}'
    #[arg(long)]
    json: Option<String>,

    /// Id of the commented delivery service request
    #[arg(long)]
    request_id: Option<i64>,

    /// Text of the comment
    #[arg(long)]
    value: Option<String>,
}

impl Body {
    /// Command line arguments take precedence over the JSON fields.
    fn try_into_comment(self) -> Result<json::DeliveryServiceRequestComment> {
        let Self {
            json: raw_json,
            request_id,
            value,
        } = self;
        let mut comment: json::DeliveryServiceRequestComment = match raw_json {
            Some(raw_json) => serde_json::from_str(&raw_json).context("Invalid comment JSON")?,
            None => Default::default(),
        };
        if request_id.is_some() {
            comment.delivery_service_request_id = request_id;
        }
        if value.is_some() {
            comment.value = value;
        }
        Ok(comment)
    }
}

fn print_response<T: Serialize>(response: &json::Response<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

fn success<T>(response: T, text: String) -> json::Response<T> {
    json::Response {
        response: Some(response),
        alerts: vec![json::Alert::success(text)],
    }
}

/// Render a failed request. Server errors are only logged.
fn failure(err: &ApiError) -> json::Response<()> {
    let text = match err.user_error() {
        Some(message) => message.to_string(),
        None => {
            if let Some(err) = err.system_error() {
                log::error!("{err:#}");
            }
            err.status()
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        }
    };
    json::Response {
        response: None,
        alerts: vec![json::Alert::error(text)],
    }
}

fn execute(connections: &Connections, command: CommentsCommand) -> Result<(), ApiError> {
    match command {
        CommentsCommand::List { caller, filter } => {
            let comments = flows::read_comments(connections, &caller.into(), filter.into())?;
            let comments: Vec<json::DeliveryServiceRequestComment> =
                comments.into_iter().map(Into::into).collect();
            print_response(&json::Response {
                response: Some(comments),
                alerts: vec![],
            })?;
        }
        CommentsCommand::Create { caller, body } => {
            let comment = body
                .try_into_comment()
                .map_err(|err| ApiError::bad_request(format!("{err:#}")))?;
            let created = flows::create_comment(connections, &caller.into(), comment.into())?;
            print_response(&success(
                json::DeliveryServiceRequestComment::from(created),
                format!("{TYPE_NAME} was created."),
            ))?;
        }
        CommentsCommand::Update { caller, id, body } => {
            let comment = body
                .try_into_comment()
                .map_err(|err| ApiError::bad_request(format!("{err:#}")))?;
            let params = Params::from([("id".to_string(), id.to_string())]);
            let updated =
                flows::update_comment(connections, &caller.into(), params, comment.into())?;
            print_response(&success(
                json::DeliveryServiceRequestComment::from(updated),
                format!("{TYPE_NAME} was updated."),
            ))?;
        }
        CommentsCommand::Delete { caller, id } => {
            let params = Params::from([("id".to_string(), id.to_string())]);
            flows::delete_comment(connections, &caller.into(), params)?;
            print_response(&json::Response::<()> {
                response: None,
                alerts: vec![json::Alert::success(format!("{TYPE_NAME} was deleted."))],
            })?;
        }
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let Cli {
        config,
        db_url,
        command,
    } = Cli::parse();

    let mut cfg = Config::try_load_from_file_or_default(config.as_ref())?;
    cfg.override_db_url(db_url);

    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size)?;
    tops_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    let Commands::Comments(command) = command;
    if let Err(err) = execute(&connections, command) {
        print_response(&failure(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
