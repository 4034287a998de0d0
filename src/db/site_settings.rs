use sqlx::PgPool;

use crate::models::{SiteConfig, SiteConfigUpdate};

/// The singleton row, or the built-in copy when the table is empty.
pub async fn get_site_config(pool: &PgPool) -> Result<SiteConfig, sqlx::Error> {
    let config = sqlx::query_as::<_, SiteConfig>(
        r#"
        SELECT
            id, site_name, seo_title, seo_description, keywords, logo_url, favicon_url,
            hero_title, hero_subtitle, hero_button_text, hero_background,
            about_banner, about_title, about_subtitle, about_history_title, about_history_text,
            contact_banner, contact_title, contact_subtitle, contact_whatsapp, contact_email,
            spaces_banner, spaces_title, spaces_subtitle,
            google_analytics_id, facebook_pixel_id, facebook_access_token,
            edited_at
        FROM site_settings
        WHERE singleton
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(config.unwrap_or_default())
}

pub async fn update_site_config(
    pool: &PgPool,
    data: SiteConfigUpdate,
) -> Result<SiteConfig, sqlx::Error> {
    let data = data.normalized();

    sqlx::query_as::<_, SiteConfig>(
        r#"
        INSERT INTO site_settings (
            site_name, seo_title, seo_description, keywords, logo_url, favicon_url,
            hero_title, hero_subtitle, hero_button_text, hero_background,
            about_banner, about_title, about_subtitle, about_history_title, about_history_text,
            contact_banner, contact_title, contact_subtitle, contact_whatsapp, contact_email,
            spaces_banner, spaces_title, spaces_subtitle,
            google_analytics_id, facebook_pixel_id, facebook_access_token
        )
        VALUES (
            $1, $2, $3, $4, $5, $6,
            $7, $8, $9, $10,
            $11, $12, $13, $14, $15,
            $16, $17, $18, $19, $20,
            $21, $22, $23,
            $24, $25, $26
        )
        ON CONFLICT (singleton) DO UPDATE
        SET
            site_name = EXCLUDED.site_name,
            seo_title = EXCLUDED.seo_title,
            seo_description = EXCLUDED.seo_description,
            keywords = EXCLUDED.keywords,
            logo_url = EXCLUDED.logo_url,
            favicon_url = EXCLUDED.favicon_url,
            hero_title = EXCLUDED.hero_title,
            hero_subtitle = EXCLUDED.hero_subtitle,
            hero_button_text = EXCLUDED.hero_button_text,
            hero_background = EXCLUDED.hero_background,
            about_banner = EXCLUDED.about_banner,
            about_title = EXCLUDED.about_title,
            about_subtitle = EXCLUDED.about_subtitle,
            about_history_title = EXCLUDED.about_history_title,
            about_history_text = EXCLUDED.about_history_text,
            contact_banner = EXCLUDED.contact_banner,
            contact_title = EXCLUDED.contact_title,
            contact_subtitle = EXCLUDED.contact_subtitle,
            contact_whatsapp = EXCLUDED.contact_whatsapp,
            contact_email = EXCLUDED.contact_email,
            spaces_banner = EXCLUDED.spaces_banner,
            spaces_title = EXCLUDED.spaces_title,
            spaces_subtitle = EXCLUDED.spaces_subtitle,
            google_analytics_id = EXCLUDED.google_analytics_id,
            facebook_pixel_id = EXCLUDED.facebook_pixel_id,
            facebook_access_token = EXCLUDED.facebook_access_token,
            edited_at = now()
        RETURNING
            id, site_name, seo_title, seo_description, keywords, logo_url, favicon_url,
            hero_title, hero_subtitle, hero_button_text, hero_background,
            about_banner, about_title, about_subtitle, about_history_title, about_history_text,
            contact_banner, contact_title, contact_subtitle, contact_whatsapp, contact_email,
            spaces_banner, spaces_title, spaces_subtitle,
            google_analytics_id, facebook_pixel_id, facebook_access_token,
            edited_at
        "#,
    )
    .bind(data.site_name.trim())
    .bind(&data.seo_title)
    .bind(&data.seo_description)
    .bind(&data.keywords)
    .bind(&data.logo_url)
    .bind(&data.favicon_url)
    .bind(&data.hero_title)
    .bind(&data.hero_subtitle)
    .bind(&data.hero_button_text)
    .bind(&data.hero_background)
    .bind(&data.about_banner)
    .bind(&data.about_title)
    .bind(&data.about_subtitle)
    .bind(&data.about_history_title)
    .bind(&data.about_history_text)
    .bind(&data.contact_banner)
    .bind(&data.contact_title)
    .bind(&data.contact_subtitle)
    .bind(&data.contact_whatsapp)
    .bind(&data.contact_email)
    .bind(&data.spaces_banner)
    .bind(&data.spaces_title)
    .bind(&data.spaces_subtitle)
    .bind(data.google_analytics_id.as_deref())
    .bind(data.facebook_pixel_id.as_deref())
    .bind(data.facebook_access_token.as_deref())
    .fetch_one(pool)
    .await
}
