//! Appliance search client

use crate::config::{
    ApplianceOptions, ApplianceOverrides, OutgoingSettings, SearchOptions, Settings,
};
use crate::error::Result;
use crate::filters::{markup::CleanMarkup, Filter, FilterContext, FilterRegistry};
use crate::network::HttpClient;
use crate::query::{ApplianceQuery, RequestParams};
use crate::results::{parse_response, SearchResult};
use crate::web::Templates;
use std::collections::BTreeMap;
use std::sync::Arc;
use tera::Context;
use tracing::{debug, info};

/// Client for one search appliance.
///
/// Holds the appliance and search options, the output filter pipelines and
/// the HTTP client. Configure it once, then call [`SearchClient::search`] per
/// page request with that request's query-string parameters.
pub struct SearchClient {
    appliance: ApplianceOptions,
    search_options: SearchOptions,
    outgoing: OutgoingSettings,
    clean_markup: bool,
    filters: FilterRegistry,
    http: HttpClient,
    templates: Arc<Templates>,
}

impl SearchClient {
    /// Create a client with the given options merged over the defaults
    pub fn new(
        appliance: &ApplianceOverrides,
        search_options: &BTreeMap<String, String>,
    ) -> Result<Self> {
        Self::build(appliance, search_options, OutgoingSettings::default())
    }

    /// Create a client from loaded settings, registering the named filters
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut client = Self::build(
            &settings.appliance,
            &settings.search,
            settings.outgoing.clone(),
        )?;
        client.clean_markup = settings.filters.clean_markup;
        for (context, names) in &settings.filters.pipelines {
            for name in names {
                client.register_filter_by_name(context, name);
            }
        }
        Ok(client)
    }

    fn build(
        appliance: &ApplianceOverrides,
        search_options: &BTreeMap<String, String>,
        outgoing: OutgoingSettings,
    ) -> Result<Self> {
        let appliance = ApplianceOptions::from_overrides(appliance);
        let http = HttpClient::for_appliance(&appliance, &outgoing)?;
        Ok(Self {
            appliance,
            search_options: SearchOptions::from_overrides(search_options),
            outgoing,
            clean_markup: true,
            filters: FilterRegistry::new(),
            http,
            templates: Arc::new(Templates::new()?),
        })
    }

    /// Reset both option sets to their defaults with the supplied values
    /// applied on top
    pub fn configure(
        &mut self,
        appliance: &ApplianceOverrides,
        search_options: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.set_appliance_options(appliance)?;
        self.set_search_options(search_options);
        Ok(())
    }

    /// Reset appliance options to defaults with the supplied values applied.
    /// A rejected appliance URL, name or search URL keeps the current one.
    pub fn set_appliance_options(&mut self, overrides: &ApplianceOverrides) -> Result<()> {
        let appliance = self.appliance.reconfigured(overrides);
        if appliance.proxy() != self.appliance.proxy() {
            self.http = HttpClient::for_appliance(&appliance, &self.outgoing)?;
        }
        self.appliance = appliance;
        Ok(())
    }

    /// Reset search options to defaults with the supplied values applied
    pub fn set_search_options(&mut self, overrides: &BTreeMap<String, String>) {
        self.search_options = SearchOptions::from_overrides(overrides);
    }

    /// Enable or disable the built-in appliance markup cleanup
    pub fn set_clean_markup(&mut self, enabled: bool) {
        self.clean_markup = enabled;
    }

    pub fn appliance_options(&self) -> &ApplianceOptions {
        &self.appliance
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.search_options
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Compiled templates, shared with the demo server
    pub fn templates(&self) -> Arc<Templates> {
        Arc::clone(&self.templates)
    }

    /// Append a filter to a context's pipeline
    pub fn register_filter(&mut self, context: FilterContext, filter: impl Filter + 'static) {
        self.filters.register(context, filter);
    }

    /// Append a built-in filter by name; unknown names are skipped
    pub fn register_filter_by_name(&mut self, context: &str, name: &str) -> bool {
        self.filters.register_named(context, name)
    }

    /// The current search term from the request
    pub fn search_query(&self, request: &RequestParams) -> String {
        request.search_terms(self.appliance.query_var())
    }

    fn resolve_terms(&self, terms: Option<&str>, request: &RequestParams) -> String {
        match terms.map(str::trim) {
            Some(terms) if !terms.is_empty() => terms.to_string(),
            _ => self.search_query(request),
        }
    }

    /// The appliance URL a search would request, or `None` if the appliance
    /// is not configured or there are no search terms
    pub fn query_url(&self, terms: Option<&str>, request: &RequestParams) -> Option<String> {
        if !self.appliance.is_searchable() {
            return None;
        }
        let terms = self.resolve_terms(terms, request);
        if terms.is_empty() {
            return None;
        }
        let query = ApplianceQuery::resolve(&terms, request, &self.appliance);
        Some(query.to_url(&self.appliance, &self.search_options))
    }

    /// Run a search.
    ///
    /// Terms come from `terms` or, failing that, from the request's query
    /// variable. Returns `Ok(None)` without contacting the appliance when the
    /// appliance URL, appliance name or terms are missing.
    pub async fn search(
        &self,
        terms: Option<&str>,
        request: &RequestParams,
    ) -> Result<Option<SearchResult>> {
        let url = match self.query_url(terms, request) {
            Some(url) => url,
            None => {
                debug!("Search skipped: appliance not configured or no search terms");
                return Ok(None);
            }
        };

        let body = self.http.get_text(&url).await?;
        let mut result = parse_response(&body)?;
        self.apply_filters(&mut result);

        info!(
            "Appliance returned {} matches for {:?} ({} on this page)",
            result.total_count,
            result.query,
            result.documents.len()
        );

        Ok(Some(result))
    }

    /// Run every document field through its filter pipeline
    pub fn apply_filters(&self, result: &mut SearchResult) {
        for doc in &mut result.documents {
            if self.clean_markup {
                doc.title = CleanMarkup::clean(&doc.title);
                doc.summary = CleanMarkup::clean(&doc.summary);
            }
            doc.no = self.filters.apply(FilterContext::No, &doc.no);
            doc.title = self.filters.apply(FilterContext::Title, &doc.title);
            doc.url = self.filters.apply(FilterContext::Url, &doc.url);
            doc.summary = self.filters.apply(FilterContext::Summary, &doc.summary);
        }
    }

    /// Base URL for the form action and paging links: the configured search
    /// page, or the current page without its query string
    fn page_base(&self, request: &RequestParams) -> String {
        if !self.appliance.search_url().is_empty() {
            return self.appliance.search_url().to_string();
        }
        request
            .page_url
            .as_deref()
            .map(|url| url.split('?').next().unwrap_or_default().to_string())
            .unwrap_or_default()
    }

    /// Render the search form, pre-filled with the current search term
    pub fn render_search_form(&self, request: &RequestParams) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("action", &self.page_base(request));
        ctx.insert("query_var", self.appliance.query_var());
        ctx.insert("query", &self.search_query(request));

        let html = self.templates.render_with_context("form.html", &ctx)?;
        Ok(self.filters.apply(FilterContext::Form, &html))
    }

    fn page_link(&self, base: &str, query: &str, page: u64) -> String {
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}&{}={}",
            base,
            separator,
            urlencoding::encode(self.appliance.query_var()),
            urlencoding::encode(query),
            urlencoding::encode(self.appliance.paging_var()),
            page
        )
    }

    /// Render previous/next links. Empty when everything fits on one page.
    pub fn render_paging_nav(
        &self,
        result: &SearchResult,
        request: &RequestParams,
    ) -> Result<String> {
        let per_page = self.appliance.per_page();
        if !result.needs_paging(per_page) {
            return Ok(String::new());
        }

        let current = result.current_page(per_page);
        let base = self.page_base(request);
        let previous_url = (result.has_previous && current > 1)
            .then(|| self.page_link(&base, &result.query, current - 1));
        let next_url = result
            .has_next
            .then(|| self.page_link(&base, &result.query, current + 1));

        let mut ctx = Context::new();
        ctx.insert("previous_url", &previous_url);
        ctx.insert("next_url", &next_url);

        let html = self.templates.render_with_context("pagination.html", &ctx)?;
        Ok(self.filters.apply(FilterContext::Nav, &html))
    }

    /// Render the result list, or a "no results" message echoing the
    /// current search term
    pub fn render_results(
        &self,
        result: Option<&SearchResult>,
        request: &RequestParams,
    ) -> Result<String> {
        let empty = SearchResult::empty("");
        let mut ctx = Context::new();
        ctx.insert("result", result.unwrap_or(&empty));
        ctx.insert("query", &self.search_query(request));
        self.templates.render_with_context("results.html", &ctx)
    }
}
