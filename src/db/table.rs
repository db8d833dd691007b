use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::SiteError;

/// Tables readable through the generic select. Anything else is rejected
/// before SQL is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    PersonalizationFeatures,
    MembershipPlans,
    MembershipFeatures,
    AccessPasses,
    PassFeatures,
    SocialPosts,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::PersonalizationFeatures,
        Table::MembershipPlans,
        Table::MembershipFeatures,
        Table::AccessPasses,
        Table::PassFeatures,
        Table::SocialPosts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Table::PersonalizationFeatures => "personalization_features",
            Table::MembershipPlans => "membership_plans",
            Table::MembershipFeatures => "membership_features",
            Table::AccessPasses => "access_passes",
            Table::PassFeatures => "pass_features",
            Table::SocialPosts => "social_posts",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::PersonalizationFeatures => &[
                "id",
                "feature_id",
                "title",
                "description",
                "image_key",
                "icon_name",
                "created_at",
            ],
            Table::MembershipPlans => &[
                "id",
                "plan_id",
                "title",
                "price",
                "original_price",
                "duration",
                "href",
                "tag",
                "sort_order",
            ],
            Table::MembershipFeatures => &["id", "feature_text", "sort_order"],
            Table::AccessPasses => &[
                "id",
                "pass_id",
                "title",
                "price",
                "duration",
                "href",
                "featured",
                "sort_order",
            ],
            Table::PassFeatures => &["id", "pass_id", "feature_text", "sort_order"],
            Table::SocialPosts => &[
                "id",
                "platform",
                "caption",
                "media_key",
                "likes",
                "comments",
                "timestamp",
            ],
        }
    }

    /// Whitelisted spelling of `name`, if it is a column of this table.
    pub fn column(self, name: &str) -> Option<&'static str> {
        self.columns().iter().copied().find(|c| *c == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SiteError::UnknownTable(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: &'static str,
    pub ascending: bool,
}

/// `SELECT * FROM <table> [ORDER BY <column> ASC|DESC]`, with both names whitelisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectQuery {
    pub table: Table,
    pub order: Option<SortSpec>,
}

impl SelectQuery {
    pub fn all(table: Table) -> Self {
        Self { table, order: None }
    }

    pub fn ordered(table: Table, column: &str, ascending: bool) -> Result<Self, SiteError> {
        let column = table
            .column(column)
            .ok_or_else(|| SiteError::UnknownColumn {
                table: table.as_str(),
                column: column.to_string(),
            })?;
        Ok(Self {
            table,
            order: Some(SortSpec { column, ascending }),
        })
    }

    /// Parses the raw `table` / `order` / `ascending` inputs of the read endpoint.
    /// A blank `order` means unsorted.
    pub fn parse(table: &str, order: Option<&str>, ascending: bool) -> Result<Self, SiteError> {
        let table: Table = table.trim().parse()?;
        match order.map(str::trim).filter(|o| !o.is_empty()) {
            Some(column) => Self::ordered(table, column, ascending),
            None => Ok(Self::all(table)),
        }
    }

    /// NULLs sort last ascending and first descending; ties keep insertion order.
    pub fn to_sql(&self) -> String {
        let columns = self.table.columns().join(", ");
        let order = match self.order {
            Some(SortSpec {
                column,
                ascending: true,
            }) => format!("{column} ASC NULLS LAST, rowid ASC"),
            Some(SortSpec {
                column,
                ascending: false,
            }) => format!("{column} DESC NULLS FIRST, rowid ASC"),
            None => "rowid ASC".to_string(),
        };
        format!("SELECT {columns} FROM {} ORDER BY {order}", self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tables_only() {
        assert_eq!(
            "membership_plans".parse::<Table>().unwrap(),
            Table::MembershipPlans
        );
        assert!(matches!(
            "users".parse::<Table>(),
            Err(SiteError::UnknownTable(name)) if name == "users"
        ));
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let err = SelectQuery::parse("access_passes", Some("price; DROP TABLE x"), true).unwrap_err();
        assert!(matches!(err, SiteError::UnknownColumn { table: "access_passes", .. }));
    }

    #[test]
    fn builds_ordered_select() {
        let query = SelectQuery::parse("membership_features", Some("sort_order"), false).unwrap();
        assert_eq!(
            query.to_sql(),
            "SELECT id, feature_text, sort_order FROM membership_features \
             ORDER BY sort_order DESC NULLS FIRST, rowid ASC"
        );
    }

    #[test]
    fn blank_order_means_unsorted() {
        let query = SelectQuery::parse("pass_features", Some("  "), true).unwrap();
        assert_eq!(query, SelectQuery::all(Table::PassFeatures));
        assert!(query.to_sql().ends_with("ORDER BY rowid ASC"));
    }
}
