//! # zengl Deposition List Command
//!
//! File: cli/src/commands/deposition/list.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `zengl deposition list` prints the user's depositions as a table:
//!
//! ```
//! ID       | State       | DOI                  | Title
//! ---------+-------------+----------------------+------------------------------
//! 1234     | done        | 10.5281/zenodo.1234  | my-project 1.0
//! 1240     | unsubmitted | -                    | my-project 1.1
//!
//! Found 2 deposition(s).
//! ```
//!
use super::ConnectionArgs;
use crate::common::zenodo::models::Deposition;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// `zengl deposition list` takes no options.
#[derive(Parser, Debug)]
pub struct ListArgs {}

pub async fn handle_list(_args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    info!("Handling deposition list command...");
    let (_, bridge) = connection.bridge()?;
    let depositions = bridge.get_depositions().await?;
    print!("{}", render_table(&depositions));
    Ok(())
}

fn render_table(depositions: &[Deposition]) -> String {
    if depositions.is_empty() {
        return "No depositions found.\n".to_string();
    }
    let mut out = format!(
        "{:<8} | {:<11} | {:<20} | {}\n",
        "ID", "State", "DOI", "Title"
    );
    out.push_str(&format!(
        "{:-<8}-+-{:-<11}-+-{:-<20}-+-{:-<30}\n",
        "", "", "", ""
    ));
    for deposition in depositions {
        out.push_str(&format!(
            "{:<8} | {:<11} | {:<20} | {}\n",
            deposition.id,
            deposition.state.as_deref().unwrap_or("-"),
            deposition.doi().unwrap_or("-"),
            deposition.title
        ));
    }
    out.push_str(&format!("\nFound {} deposition(s).\n", depositions.len()));
    out
}
