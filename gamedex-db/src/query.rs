//! Query composition for game listings.
//!
//! A listing request is a bundle of optional filters (collection membership,
//! provider set, title search) plus sort and pagination. The composer turns
//! one request into two statements: the page query and its count query. Both
//! are built from a single shared clause/parameter list, so the pagination
//! metadata can never disagree with the rows actually returned.

use rusqlite::types::Value;

/// Sort orders accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    TitleAsc,
    TitleDesc,
    Random,
}

impl SortOrder {
    /// Parse a transport value. Unrecognized values yield `None`, which
    /// leaves rows in insertion order (no ORDER BY is appended).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::TitleAsc),
            "desc" => Some(Self::TitleDesc),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            Self::TitleAsc => " ORDER BY title ASC",
            Self::TitleDesc => " ORDER BY title DESC",
            Self::Random => " ORDER BY RANDOM()",
        }
    }
}

/// Provider filter for a listing request.
///
/// The transport encodes this as the sentinel `"All"`, a single name, or a
/// comma-delimited set. An `"All"` token anywhere in the set disables the
/// filter entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProviderFilter {
    #[default]
    All,
    Named(Vec<String>),
}

impl ProviderFilter {
    /// Parse the transport encoding.
    pub fn parse(raw: &str) -> Self {
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() || names.iter().any(|name| name == "All") {
            Self::All
        } else {
            Self::Named(names)
        }
    }
}

/// A fully-defaulted listing request.
#[derive(Debug, Clone)]
pub struct GameListQuery {
    pub page: i64,
    pub limit: i64,
    pub providers: ProviderFilter,
    pub sort: Option<SortOrder>,
    pub search: Option<String>,
    pub collection_id: Option<i64>,
}

impl Default for GameListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 60,
            providers: ProviderFilter::All,
            sort: None,
            search: None,
            collection_id: None,
        }
    }
}

impl GameListQuery {
    /// Page number clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Page size clamped to at least 1.
    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }

    fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// The paired statements for one listing request.
///
/// The page statement binds `filter_params` followed by `page_params`; the
/// count statement binds `filter_params` alone.
#[derive(Debug)]
pub(crate) struct ComposedQuery {
    pub select_sql: String,
    pub count_sql: String,
    pub filter_params: Vec<Value>,
    pub page_params: [Value; 2],
}

/// Build the page and count statements for a listing request.
///
/// Filters are evaluated in fixed order: collection membership, provider
/// set, search term. Each present filter appends exactly one clause and its
/// parameters to the shared list consumed by both statements.
pub(crate) fn compose(query: &GameListQuery) -> ComposedQuery {
    let mut from = " FROM games";
    let mut conditions: Vec<String> = Vec::new();
    let mut filter_params: Vec<Value> = Vec::new();

    if let Some(collection_id) = query.collection_id {
        from = " FROM games JOIN collection_games ON games.id = collection_games.game_id";
        conditions.push("collection_games.collection_id = ?".into());
        filter_params.push(Value::from(collection_id));
    }

    if let ProviderFilter::Named(names) = &query.providers {
        let placeholders = vec!["?"; names.len()].join(",");
        conditions.push(format!("provider IN ({placeholders})"));
        for name in names {
            filter_params.push(Value::from(name.clone()));
        }
    }

    if let Some(term) = query.search.as_deref() {
        let term = term.trim();
        if !term.is_empty() {
            conditions.push("title LIKE ?".into());
            filter_params.push(Value::from(format!("%{term}%")));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let mut select_sql = format!("SELECT games.*{from}{where_clause}");
    if let Some(sort) = query.sort {
        select_sql.push_str(sort.order_clause());
    }
    select_sql.push_str(" LIMIT ? OFFSET ?");

    let count_sql = format!("SELECT COUNT(*){from}{where_clause}");

    ComposedQuery {
        select_sql,
        count_sql,
        filter_params,
        page_params: [Value::from(query.limit()), Value::from(query.offset())],
    }
}
