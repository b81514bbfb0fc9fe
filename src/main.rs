mod domain;
mod clients;
mod config;
mod messages;
mod query;
mod remote;
mod store;
mod validation;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod user_actor;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, UserSystem};
use crate::config::AppConfig;
use crate::domain::format::{status_label, title_case};
use crate::domain::{SortField, SortOrder, User, UserFilters, UserStatus};
use crate::messages::Outcome;
use crate::validation::{parse_form, UserInput};

fn log_users(heading: &str, users: &[User]) {
    info!(count = users.len(), "{heading}");
    for user in users {
        info!(
            id = user.id,
            name = %title_case(&user.name),
            email = %user.email,
            status = status_label(user.status.as_str()),
            "  user"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config);

    info!(
        production = config.production,
        page_sizes = ?config.pagination.page_size_options,
        "Starting user directory"
    );

    let system = UserSystem::new(&config);

    let loading_log = system
        .store
        .loading()
        .subscribe(|loading: &bool| tracing::debug!(loading = *loading, "Loading changed"));
    let error_log = system.store.error().subscribe(|message: &Option<String>| {
        if let Some(message) = message {
            warn!(error = %message, "Store error");
        }
    });

    // Active users, names Z to A.
    let filters = UserFilters::default()
        .with_status(UserStatus::Active)
        .sorted_by(SortField::Name, SortOrder::Desc)
        .with_page(1, config.pagination.default_page_size);
    let span = tracing::info_span!("initial_load");
    let loaded = async { system.user_client.load_users(filters).await.map_err(|e| e.to_string()) }
        .instrument(span)
        .await?;

    match loaded {
        Outcome::Succeeded(page) => {
            info!(total = page.total, page = page.page, limit = page.limit, "Page loaded");
            log_users("Active users", &page.users);
        }
        Outcome::Failed(message) => {
            error!(error = %message, "Could not load users");
            system.shutdown().await?;
            return Err(message);
        }
    }

    // Re-page what the store already holds without another fetch.
    system.store.update_filters(|filters| filters.limit = Some(2));
    let smaller = query::run_list_query(&system.store.current_users(), &system.store.current_filters());
    log_users("First two from the store", &smaller.users);

    tokio::time::sleep(config.search_debounce()).await;
    let found = system
        .user_client
        .search_users("le".to_string())
        .await
        .map_err(|e| e.to_string())?;
    if let Some(found) = found.ok() {
        log_users("Search \"le\"", &found);
    }

    let rejected = parse_form(UserInput::new("A", "not-an-email", "pending"));
    if let Err(report) = rejected {
        warn!(errors = %report, "Form rejected");
    }

    let form = parse_form(UserInput::new("New User", "new@example.com", "active")).map_err(|report| report.to_string())?;
    let span = tracing::info_span!("user_lifecycle");
    async {
        let created = system
            .user_client
            .create_user(form.clone())
            .await
            .map_err(|e| e.to_string())?;
        let Some(created) = created.ok() else {
            return Ok::<(), String>(());
        };
        info!(user_id = created.id, "Created");

        let mut edited = form.clone();
        edited.status = UserStatus::Inactive;
        let updated = system
            .user_client
            .update_user(created.id, edited)
            .await
            .map_err(|e| e.to_string())?;
        if let Some(updated) = updated.ok() {
            info!(user_id = updated.id, status = %updated.status, "Updated");
        }

        let deleted = system
            .user_client
            .delete_user(created.id)
            .await
            .map_err(|e| e.to_string())?;
        info!(deleted = deleted.is_success(), error = ?deleted.error(), still_present = system.store.contains(created.id), "Deleted");
        Ok(())
    }
    .instrument(span)
    .await?;

    match system.user_client.get_user(1).await.map_err(|e| e.to_string())? {
        Outcome::Succeeded(user) => info!(user_id = user.id, name = %user.name, "Fetched single user"),
        Outcome::Failed(message) => warn!(error = %message, "Single user fetch failed"),
    }

    loading_log.unsubscribe();
    drop(error_log);
    system.store.reset();

    system.shutdown().await?;

    info!("User directory finished");
    Ok(())
}
