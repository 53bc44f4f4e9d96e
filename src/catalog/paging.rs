use std::str::FromStr;

use serde::Deserialize;

use super::{CatalogError, CatalogResult};
use crate::config::PagingConfig;

/// A property a list may be ordered by. Implementors are closed enums, so
/// the property name that ends up in a query always comes from this crate.
pub trait SortKey: Copy + std::fmt::Debug + Send + Sync + 'static {
    const DEFAULT: Self;
    const ALLOWED: &'static [Self];

    fn property(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALLOWED.iter().copied().find(|key| key.property() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSort {
    Title,
    Released,
    Year,
    ImdbRating,
    Runtime,
}

impl SortKey for MovieSort {
    const DEFAULT: Self = MovieSort::Title;
    const ALLOWED: &'static [Self] = &[
        MovieSort::Title,
        MovieSort::Released,
        MovieSort::Year,
        MovieSort::ImdbRating,
        MovieSort::Runtime,
    ];

    fn property(self) -> &'static str {
        match self {
            MovieSort::Title => "title",
            MovieSort::Released => "released",
            MovieSort::Year => "year",
            MovieSort::ImdbRating => "imdbRating",
            MovieSort::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSort {
    Name,
    Born,
    Died,
}

impl SortKey for PersonSort {
    const DEFAULT: Self = PersonSort::Name;
    const ALLOWED: &'static [Self] = &[PersonSort::Name, PersonSort::Born, PersonSort::Died];

    fn property(self) -> &'static str {
        match self {
            PersonSort::Name => "name",
            PersonSort::Born => "born",
            PersonSort::Died => "died",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(CatalogError::InvalidParameter(format!(
                "order must be ASC or DESC, got {:?}",
                s
            ))),
        }
    }
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw paging input as it arrives from a caller, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingParams {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagingSpec<S: SortKey> {
    pub sort: S,
    pub order: SortOrder,
    pub skip: u64,
    pub limit: u64,
    pub query: Option<String>,
}

impl<S: SortKey> PagingSpec<S> {
    pub fn from_params(params: &PagingParams, config: &PagingConfig) -> CatalogResult<Self> {
        let sort = match params.sort.as_deref() {
            None => S::DEFAULT,
            Some(name) => S::parse(name).ok_or_else(|| {
                let allowed: Vec<&str> = S::ALLOWED.iter().map(|key| key.property()).collect();
                CatalogError::InvalidParameter(format!(
                    "sort must be one of {}, got {:?}",
                    allowed.join(", "),
                    name
                ))
            })?,
        };

        let order = match params.order.as_deref() {
            None => SortOrder::default(),
            Some(s) => s.parse::<SortOrder>()?,
        };

        let skip = match params.skip {
            None => 0,
            Some(n) => u64::try_from(n).map_err(|_| {
                CatalogError::InvalidParameter(format!("skip must not be negative, got {}", n))
            })?,
        };

        let limit = match params.limit {
            None => config.default_limit,
            Some(n) if n <= 0 => {
                return Err(CatalogError::InvalidParameter(format!(
                    "limit must be positive, got {}",
                    n
                )))
            }
            Some(n) => n as u64,
        };
        if limit > config.max_limit {
            return Err(CatalogError::InvalidParameter(format!(
                "limit must not exceed {}, got {}",
                config.max_limit, limit
            )));
        }

        let query = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(Self {
            sort,
            order,
            skip,
            limit,
            query,
        })
    }

    pub fn new(sort: S, order: SortOrder, skip: u64, limit: u64) -> Self {
        Self {
            sort,
            order,
            skip,
            limit,
            query: None,
        }
    }
}

impl<S: SortKey> Default for PagingSpec<S> {
    fn default() -> Self {
        let config = PagingConfig::default();
        Self::new(S::DEFAULT, SortOrder::Asc, 0, config.default_limit)
    }
}
