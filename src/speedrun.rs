use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::SubcategoryTarget;
use crate::error::CollectError;
use crate::export;
use crate::http;
use crate::model::Envelope;
use crate::model::game::{Category, Game, Variable};
use crate::model::record::{GameIdentifiers, RecordEntry};
use crate::model::run::{Run, RunsPage};
use crate::progression;

/// speedrun.com REST client bound to a base URL.
#[derive(Debug, Clone)]
pub struct SpeedrunApi {
    base_url: String,
}

impl Default for SpeedrunApi {
    fn default() -> Self {
        Self::new(crate::config::SPEEDRUN_API_BASE)
    }
}

impl SpeedrunApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Id of the first game the API returns for a name search.
    #[instrument(level = "info", skip(self))]
    pub fn find_game_id(&self, game_name: &str) -> Result<String, CollectError> {
        let url = format!("{}/games", self.base_url);
        let games: Envelope<Vec<Game>> = http::get_json(&url, &[("name", game_name)], &[])?;
        select_game(&games.data)
            .map(|g| g.id.clone())
            .ok_or_else(|| CollectError::NotFound(format!("game '{}'", game_name)))
    }

    #[instrument(level = "info", skip(self))]
    pub fn find_category_id(&self, game_id: &str, category_name: &str) -> Result<String, CollectError> {
        let url = format!("{}/games/{}/categories", self.base_url, game_id);
        let categories: Envelope<Vec<Category>> = http::get_json(&url, &[], &[])?;
        select_category(&categories.data, category_name)
            .map(|c| c.id.clone())
            .ok_or_else(|| CollectError::NotFound(format!("category '{}'", category_name)))
    }

    /// Returns `(variable_id, value_id, value_label)` for a sub-category.
    #[instrument(level = "info", skip(self))]
    pub fn find_variable_value(
        &self,
        category_id: &str,
        variable_name: &str,
        value_label: &str,
    ) -> Result<(String, String, String), CollectError> {
        let url = format!("{}/categories/{}/variables", self.base_url, category_id);
        let variables: Envelope<Vec<Variable>> = http::get_json(&url, &[], &[])?;
        select_variable_value(&variables.data, variable_name, value_label).ok_or_else(|| {
            CollectError::NotFound(format!("variable '{}' with value '{}'", variable_name, value_label))
        })
    }

    /// Resolve game, category and sub-category ids in sequence. The first miss is fatal.
    pub fn resolve(&self, target: &SubcategoryTarget) -> Result<GameIdentifiers, CollectError> {
        let game_id = self.find_game_id(target.game)?;
        let category_id = self.find_category_id(&game_id, target.category)?;
        let (variable_id, value_id, value_label) =
            self.find_variable_value(&category_id, target.variable, target.value)?;
        info!(%game_id, %category_id, %variable_id, %value_id, %value_label, "Resolved identifiers");
        Ok(GameIdentifiers { game_id, category_id, variable_id, value_id, value_label })
    }

    /// Every verified or obsoleted run of a category, oldest first, with players embedded.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_all_runs(&self, game_id: &str, category_id: &str) -> Result<Vec<Run>, CollectError> {
        let first_url = format!(
            "{}/runs?game={}&category={}&status=verified&obsoleted=true&orderby=date&direction=asc&embed=players",
            self.base_url, game_id, category_id
        );
        // Later pages come from the API's own `next` links, so only the first url is built here
        let runs = collect_pages(first_url, |url| http::get_json::<RunsPage>(url, &[], &[]))?;
        info!(total = runs.len(), "Fetched all runs of category");
        Ok(runs)
    }
}

/// The API already searches by name; its first hit wins.
pub fn select_game(games: &[Game]) -> Option<&Game> {
    games.first()
}

/// First category whose name equals `name`, ignoring case.
pub fn select_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name.to_lowercase() == name.to_lowercase())
}

/// First `(variable_id, value_id, label)` where both the variable name and value label match, ignoring case.
pub fn select_variable_value(
    variables: &[Variable],
    variable_name: &str,
    value_label: &str,
) -> Option<(String, String, String)> {
    let variable_name = variable_name.to_lowercase();
    let value_label = value_label.to_lowercase();
    variables
        .iter()
        .filter(|v| v.name.to_lowercase() == variable_name)
        .find_map(|v| {
            v.values
                .values
                .iter()
                .find(|(_, val)| val.label.to_lowercase() == value_label)
                .map(|(val_id, val)| (v.id.clone(), val_id.clone(), val.label.clone()))
        })
}

/// Follow `next` links from `first_url` until a page has none, concatenating every page's runs.
/// Any failed page aborts the walk.
pub fn collect_pages<F>(first_url: String, mut fetch_page: F) -> Result<Vec<Run>, CollectError>
where
    F: FnMut(&str) -> Result<RunsPage, CollectError>,
{
    let mut all_runs: Vec<Run> = Vec::new();
    let mut next_url = Some(first_url);
    while let Some(url) = next_url {
        let page = fetch_page(&url)?;
        // Read the link before `page.data` is moved out
        next_url = page.pagination.next_uri().map(str::to_string);
        all_runs.extend(page.data);
        debug!(collected = all_runs.len(), "Fetched runs page");
    }
    Ok(all_runs)
}

/// Resolve, fetch, scan and write the record history for `target`. Returns a one-line summary.
pub fn collect(api: &SpeedrunApi, target: &SubcategoryTarget, out_path: &Path) -> Result<String, CollectError> {
    info!(game = target.game, category = target.category, variable = target.variable, value = target.value, "Collecting record progression");
    let ids = api.resolve(target)?;

    let runs = api.fetch_all_runs(&ids.game_id, &ids.category_id)?;
    if runs.is_empty() {
        info!("No runs in category history");
        return Ok("Speedrun: no runs in category (skipped)".to_string());
    }

    // The scan needs date order regardless of how the pages came back
    let sorted = progression::sort_runs_by_date(runs);
    let history: Vec<RecordEntry> = progression::record_progression(&sorted, &ids.variable_id, &ids.value_id);
    // Nothing matched the sub-category: no file, not an error
    if history.is_empty() {
        info!(value_label = %ids.value_label, "No record history for sub-category");
        return Ok("Speedrun: no record history (skipped)".to_string());
    }

    export::write_rows(out_path, &history)?;
    Ok(format!("Speedrun: {} records written to {}", history.len(), out_path.display()))
}
