//! Document naming series backed by PostgreSQL sequences.

use sea_orm::{ConnectionTrait, DbErr, Statement};

/// Naming series for generated document names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingSeries {
    /// `EXP-00001`
    ExpenseEntry,
    /// `JV-00001`
    JournalEntry,
}

impl NamingSeries {
    const fn prefix(self) -> &'static str {
        match self {
            Self::ExpenseEntry => "EXP",
            Self::JournalEntry => "JV",
        }
    }

    const fn sequence(self) -> &'static str {
        match self {
            Self::ExpenseEntry => "expense_entry_seq",
            Self::JournalEntry => "journal_entry_seq",
        }
    }

    /// Formats a name from a sequence value.
    #[must_use]
    pub fn format(self, value: i64) -> String {
        format!("{}-{value:05}", self.prefix())
    }

    /// Takes the next name from the series.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be read.
    pub async fn next<C: ConnectionTrait>(self, conn: &C) -> Result<String, DbErr> {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            format!("SELECT nextval('{}') AS value", self.sequence()),
        );

        let row = conn
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(self.sequence().to_string()))?;
        let value: i64 = row.try_get("", "value")?;

        Ok(self.format(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_five_digits() {
        assert_eq!(NamingSeries::ExpenseEntry.format(1), "EXP-00001");
        assert_eq!(NamingSeries::JournalEntry.format(42), "JV-00042");
        assert_eq!(NamingSeries::JournalEntry.format(123_456), "JV-123456");
    }
}
