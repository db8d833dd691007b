//! Default homepage content, written into tables that are still empty.

use chrono::{TimeDelta, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::error::SiteError;

struct SeedFeature {
    feature_id: &'static str,
    title: &'static str,
    icon_name: &'static str,
    description: &'static str,
}

const PERSONALIZATION: &[SeedFeature] = &[
    SeedFeature {
        feature_id: "strength",
        title: "Strength",
        icon_name: "Dumbbell",
        description: "Build raw power and sculpt your physique with strength programs that adapt to your performance.",
    },
    SeedFeature {
        feature_id: "cardio",
        title: "Cardio",
        icon_name: "HeartPulse",
        description: "Elevate your endurance with cardio routines that adapt to your heart rate zones in real time.",
    },
    SeedFeature {
        feature_id: "functional",
        title: "Functional",
        icon_name: "Zap",
        description: "Improve mobility, balance, and coordination with workouts built for real-world movement.",
    },
    SeedFeature {
        feature_id: "recovery",
        title: "Recovery",
        icon_name: "GitCommitHorizontal",
        description: "Accelerate recovery and enhance flexibility with guided sessions between hard training days.",
    },
];

struct SeedPlan {
    plan_id: &'static str,
    title: &'static str,
    price: &'static str,
    original_price: Option<&'static str>,
    duration: &'static str,
    tag: Option<&'static str>,
}

const PLANS: &[SeedPlan] = &[
    SeedPlan {
        plan_id: "monthly",
        title: "Monthly",
        price: "₹1199",
        original_price: None,
        duration: "/ month",
        tag: None,
    },
    SeedPlan {
        plan_id: "quarterly",
        title: "3 Months",
        price: "₹3099",
        original_price: Some("₹3597"),
        duration: "/ quarter",
        tag: Some("Save 14%"),
    },
    SeedPlan {
        plan_id: "semi_annually",
        title: "6 Months",
        price: "₹5999",
        original_price: Some("₹7194"),
        duration: "/ half year",
        tag: Some("Save 17%"),
    },
    SeedPlan {
        plan_id: "annually",
        title: "12 Months",
        price: "₹10999",
        original_price: Some("₹14388"),
        duration: "/ year",
        tag: Some("Save 23%"),
    },
];

const MEMBERSHIP_FEATURES: &[&str] = &[
    "Certified Trainers On-Floor",
    "Customized Nutrition Diet Plans",
    "Full Steam Bath Access",
    "Unlimited Group Classes",
    "Locker & Shower Facilities",
];

struct SeedPass {
    pass_id: &'static str,
    title: &'static str,
    price: &'static str,
    duration: &'static str,
    featured: bool,
    features: &'static [&'static str],
}

const PASSES: &[SeedPass] = &[
    SeedPass {
        pass_id: "daily",
        title: "Daily Pass",
        price: "₹199",
        duration: "/ Day",
        featured: false,
        features: &["Full Gym Floor Access", "Cardio Zone Entry", "Locker Usage"],
    },
    SeedPass {
        pass_id: "weekly",
        title: "Weekly Pass",
        price: "₹699",
        duration: "/ Week",
        featured: true,
        features: &[
            "Everything in Daily Pass",
            "Access to Functional Zone",
            "1 Group Class Entry",
            "Priority Support",
        ],
    },
    SeedPass {
        pass_id: "fortnight",
        title: "Fortnight Pass",
        price: "₹799",
        duration: "/ 15 Days",
        featured: false,
        features: &[
            "Everything in Weekly Pass",
            "Unlimited Group Classes",
            "1 Free Supplement Shake",
        ],
    },
];

struct SeedPost {
    platform: &'static str,
    caption: &'static str,
    media_key: &'static str,
    likes: i64,
    comments: i64,
    timestamp: &'static str,
}

const POSTS: &[SeedPost] = &[
    SeedPost {
        platform: "instagram",
        caption: "Pushing limits and breaking barriers in the Strength Matrix today! #Strength",
        media_key: "social/strength-post-01.jpg",
        likes: 1254,
        comments: 45,
        timestamp: "2025-09-06 10:00:00+00:00",
    },
    SeedPost {
        platform: "facebook",
        caption: "That feeling after a killer cardio session on the new treadmills.",
        media_key: "social/cardio-post-01.jpg",
        likes: 832,
        comments: 22,
        timestamp: "2025-09-05 18:30:00+00:00",
    },
    SeedPost {
        platform: "instagram",
        caption: "Finding my flow in the yoga studio. Perfect way to end the week. #MindAndBody",
        media_key: "social/yoga-post-01.jpg",
        likes: 2109,
        comments: 88,
        timestamp: "2025-09-05 12:00:00+00:00",
    },
    SeedPost {
        platform: "facebook",
        caption: "Our functional training zone is no joke! Stronger and more agile every day.",
        media_key: "social/functional-post-01.jpg",
        likes: 641,
        comments: 15,
        timestamp: "2025-09-04 09:00:00+00:00",
    },
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

async fn is_empty(conn: &mut SqliteConnection, table: &str) -> Result<bool, SiteError> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(conn)
        .await?;
    Ok(count == 0)
}

/// Seeds every content table that has no rows yet. Tables with content are left alone.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), SiteError> {
    let mut tx = pool.begin().await?;

    if is_empty(&mut tx, "personalization_features").await? {
        let base = Utc::now();
        for (offset, feature) in (0_i64..).zip(PERSONALIZATION) {
            sqlx::query(
                r#"
                INSERT INTO personalization_features (
                    id, feature_id, title, description, image_key, icon_name, created_at
                )
                VALUES (?, ?, ?, ?, NULL, ?, ?)
                "#,
            )
            .bind(new_id())
            .bind(feature.feature_id)
            .bind(feature.title)
            .bind(feature.description)
            .bind(feature.icon_name)
            .bind(base + TimeDelta::seconds(offset))
            .execute(&mut *tx)
            .await?;
        }
        info!(rows = PERSONALIZATION.len(), "seeded personalization_features");
    }

    if is_empty(&mut tx, "membership_plans").await? {
        for (position, plan) in (1_i64..).zip(PLANS) {
            sqlx::query(
                r#"
                INSERT INTO membership_plans (
                    id, plan_id, title, price, original_price, duration, href, tag, sort_order
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(new_id())
            .bind(plan.plan_id)
            .bind(plan.title)
            .bind(plan.price)
            .bind(plan.original_price)
            .bind(plan.duration)
            .bind(format!("https://wa.me/?text=membership_{}", plan.plan_id))
            .bind(plan.tag)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }
        info!(rows = PLANS.len(), "seeded membership_plans");
    }

    if is_empty(&mut tx, "membership_features").await? {
        for (position, text) in (1_i64..).zip(MEMBERSHIP_FEATURES) {
            sqlx::query("INSERT INTO membership_features (id, feature_text, sort_order) VALUES (?, ?, ?)")
                .bind(new_id())
                .bind(*text)
                .bind(position)
                .execute(&mut *tx)
                .await?;
        }
        info!(rows = MEMBERSHIP_FEATURES.len(), "seeded membership_features");
    }

    if is_empty(&mut tx, "access_passes").await? {
        for (position, pass) in (1_i64..).zip(PASSES) {
            sqlx::query(
                r#"
                INSERT INTO access_passes (
                    id, pass_id, title, price, duration, href, featured, sort_order
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(new_id())
            .bind(pass.pass_id)
            .bind(pass.title)
            .bind(pass.price)
            .bind(pass.duration)
            .bind(format!("https://wa.me/?text=plan_{}", pass.pass_id))
            .bind(pass.featured)
            .bind(position)
            .execute(&mut *tx)
            .await?;

            for (feature_position, text) in (1_i64..).zip(pass.features) {
                sqlx::query(
                    "INSERT INTO pass_features (id, pass_id, feature_text, sort_order) VALUES (?, ?, ?, ?)",
                )
                .bind(new_id())
                .bind(pass.pass_id)
                .bind(*text)
                .bind(feature_position)
                .execute(&mut *tx)
                .await?;
            }
        }
        info!(rows = PASSES.len(), "seeded access_passes and pass_features");
    }

    if is_empty(&mut tx, "social_posts").await? {
        for post in POSTS {
            sqlx::query(
                r#"
                INSERT INTO social_posts (id, platform, caption, media_key, likes, comments, timestamp)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(new_id())
            .bind(post.platform)
            .bind(post.caption)
            .bind(post.media_key)
            .bind(post.likes)
            .bind(post.comments)
            .bind(post.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        info!(rows = POSTS.len(), "seeded social_posts");
    }

    tx.commit().await?;
    Ok(())
}
