/// Logs an unexpected state and keeps a copy in `error_logs`, without
/// waiting for the insert.
///
/// `log_err!(pool, "what happened", params)`; `params` is anything
/// serializable.
#[macro_export]
macro_rules! log_err {
    ($pool:expr, $message:expr, $params:expr) => {{
        let pool = $pool.clone();
        let location = format!("{}:{}", file!(), line!());
        let message: String = ($message).into();
        let params = ::serde_json::to_value($params).unwrap_or(::serde_json::Value::Null);

        ::log::error!("{} at {}: {}", message, location, params);

        ::tokio::spawn(async move {
            if let Err(e) = ::sqlx::query(
                r#"
                INSERT INTO error_logs (location, message, parameters)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(&location)
            .bind(&message)
            .bind(&params)
            .execute(&pool)
            .await
            {
                ::log::warn!("could not store error log for {}: {}", location, e);
            }
        });
    }};
}
