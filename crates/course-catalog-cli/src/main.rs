// SPDX-License-Identifier: AGPL-3.0
// Course Catalog CLI - Terminal frontend

mod commands;

use anyhow::Context;
use clap::Parser;
use commands::{Cli, Command};
use course_catalog_core::{
    instructor_label, CatalogSettings, CourseCatalog, CourseListScreen, FavoritesController, FileStore,
    HttpCourseSource, KeyValueStore, LoadState, MemoryStore, SettingsStore, FETCH_ERROR_MESSAGE,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("course_catalog_cli=info".parse()?)
                .add_directive("course_catalog_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting Course Catalog CLI v{}", env!("CARGO_PKG_VERSION"));

    let settings = match &cli.config {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::new(),
    }
    .context("Failed to load settings")?
    .get();

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(settings.resolve_data_dir()?)?)
    };
    let favorites = FavoritesController::new(store.clone());

    match cli.command {
        Command::Favorite { id } => {
            let set = favorites.toggle_favorite(id)?;
            if set.contains(id) {
                println!("★ Course {} marked as favorite", id);
            } else {
                println!("☆ Course {} unmarked as favorite", id);
            }
        }
        Command::Favorites => {
            for id in favorites.load_favorites().ids() {
                println!("{}", id);
            }
        }
        Command::List(args) => {
            let Some(mut screen) = mount_list(&settings, store, favorites).await? else {
                return Ok(ExitCode::FAILURE);
            };

            if let Some(instructor) = args.instructor {
                screen.select_instructor(instructor);
            }
            screen.set_long_titles_only(args.long_titles);
            screen.set_sort_ascending(!args.desc);
            if let Some(term) = args.search {
                screen.set_search_term(term);
            }

            let visible = screen.visible_courses();
            if let Some(message) = screen.empty_message(&visible) {
                println!("{}", message);
            }
            for course in &visible {
                let marker = if screen.is_favorite(course.id) { " ★" } else { "" };
                println!(
                    "[{}] {} (instructor {}){}",
                    course.id, course.title, course.user_id, marker
                );
            }
        }
        Command::Instructors => {
            let Some(screen) = mount_list(&settings, store, favorites).await? else {
                return Ok(ExitCode::FAILURE);
            };

            for choice in screen.instructors() {
                println!("{}\t{}", choice, instructor_label(&choice));
            }
        }
        Command::Show { id } => {
            let Some(screen) = mount_list(&settings, store, favorites).await? else {
                return Ok(ExitCode::FAILURE);
            };
            let Some(detail) = screen.open(id) else {
                eprintln!("Course {} not found", id);
                return Ok(ExitCode::FAILURE);
            };

            let course = detail.course();
            println!("{}", course.title);
            println!("Instructor ID: {}", course.user_id);
            println!("Description:\n{}", course.body);
            println!("Word Count: {}", detail.word_count());
            println!(
                "{}",
                if detail.is_favorite() { "★ Favorite" } else { "☆ Not a favorite" }
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the list screen and run its first load. `None` in the failed state.
async fn mount_list(
    settings: &CatalogSettings,
    store: Arc<dyn KeyValueStore>,
    favorites: FavoritesController,
) -> anyhow::Result<Option<CourseListScreen>> {
    let source = Arc::new(HttpCourseSource::from_settings(settings)?);
    let mut screen = CourseListScreen::new(CourseCatalog::new(source, store), favorites);

    if screen.mount().await == LoadState::Failed {
        eprintln!("{}", FETCH_ERROR_MESSAGE);
        return Ok(None);
    }
    Ok(Some(screen))
}
