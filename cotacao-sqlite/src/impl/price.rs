use crate::{
    Db, Error,
    types::{DateTime, PriceRow},
};
use cotacao_core::{models::PriceRecord, ports::PriceRepository};
use std::time::Duration;
use tracing::{Level, event};

impl PriceRepository for Db {
    /// Insert one row in its own transaction, bounded by `deadline`.
    ///
    /// A [`Error::DeadlineExceeded`] means the insert was abandoned, not that
    /// it never happened: a commit already handed to SQLite can still land.
    async fn record_price(
        &self,
        price: f64,
        as_of: Self::DateTime,
        deadline: Duration,
    ) -> Result<PriceRecord<Self::DateTime>, Self::Error> {
        // The deadline covers waiting for the writer, the insert and the commit.
        // If it fires first, the transaction is dropped uncommitted and rolled back.
        // If it fires while the commit is already with the SQLite worker, the row
        // may land anyway and `DeadlineExceeded` is still returned.
        let insert = async {
            let mut tx = self.writer.begin().await?;
            let row = sqlx::query_as::<_, PriceRow>(
                r#"
                insert into
                    dolar_prices (price, time)
                values
                    ($1, $2)
                returning
                    id, price, time
                "#,
            )
            .bind(price)
            .bind(as_of)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(row)
        };

        let row = tokio::time::timeout(deadline, insert)
            .await
            .map_err(|_| Error::DeadlineExceeded(deadline))??;

        event!(Level::DEBUG, id = row.id, price = row.price, "recorded price");
        Ok(row.into())
    }

    async fn recent_prices(
        &self,
        limit: usize,
    ) -> Result<Vec<PriceRecord<DateTime>>, Self::Error> {
        let rows = sqlx::query_as::<_, PriceRow>(
            r#"
            select
                id, price, time
            from
                dolar_prices
            order by
                id desc
            limit $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
