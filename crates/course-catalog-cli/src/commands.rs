// SPDX-License-Identifier: AGPL-3.0
// Course Catalog CLI - Commands and arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the course catalog, with an offline cache and local favorites
#[derive(Parser, Debug)]
#[command(name = "course-catalog", version)]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep cache and favorites in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List courses after filtering, searching and sorting
    List(ListArgs),

    /// List instructor choices for the instructor filter
    Instructors,

    /// Show one course in detail
    Show { id: u64 },

    /// Mark or unmark a course as favorite
    Favorite { id: u64 },

    /// Print favorited course ids
    Favorites,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only courses by this instructor id ("All" for everyone)
    #[arg(long)]
    pub instructor: Option<String>,

    /// Only titles with at least five words
    #[arg(long)]
    pub long_titles: bool,

    /// Sort by word count descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
}
