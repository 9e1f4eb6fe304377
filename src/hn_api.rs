use anyhow::Context;

/// A story or comment as returned by `/item/{id}.json`.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct Item {
    pub(crate) id: Option<u64>,
    pub(crate) by: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) score: Option<i64>,
    pub(crate) time: Option<i64>,

    #[serde(alias = "children")]
    pub(crate) kids: Option<Vec<u64>>,
}

impl TryFrom<Item> for crate::Post {
    type Error = anyhow::Error;

    fn try_from(item: Item) -> anyhow::Result<Self> {
        let id = item.id.context("Story is missing `id`")?;
        Ok(Self {
            title: item
                .title
                .with_context(|| format!("Story {id} is missing `title`"))?,
            url: item.url,
            score: item
                .score
                .with_context(|| format!("Story {id} is missing `score`"))?,
            author: item
                .by
                .with_context(|| format!("Story {id} is missing `by`"))?,
            created_at: item
                .time
                .with_context(|| format!("Story {id} is missing `time`"))?,
            id,
        })
    }
}

impl From<Item> for crate::Comment {
    fn from(item: Item) -> Self {
        Self {
            author: item.by,
            text: item.text,
            created_at: item.time,
        }
    }
}

pub(crate) async fn get_top_story_ids(base_url: &str) -> anyhow::Result<Vec<u64>> {
    let url = format!("{base_url}/topstories.json");
    tracing::debug!(url, "Requesting top stories");

    let response = crate::CLIENT.get(&url).send().await?;
    if response.status() != reqwest::StatusCode::OK {
        tracing::warn!(url, status = %response.status(), "Top stories unavailable");
        return Ok(Vec::new());
    }

    response
        .json::<Vec<u64>>()
        .await
        .context("Failed to parse top stories")
}

/// Returns `None` for a non-200 response as well as for an empty (`null` or `{}`) item.
pub(crate) async fn get_item(base_url: &str, id: u64) -> anyhow::Result<Option<Item>> {
    let url = format!("{base_url}/item/{id}.json");
    tracing::debug!(url, "Requesting item");

    let response = crate::CLIENT.get(&url).send().await?;
    if response.status() != reqwest::StatusCode::OK {
        tracing::warn!(item_id = id, status = %response.status(), "Item unavailable");
        return Ok(None);
    }

    let raw = response
        .json::<Option<serde_json::Map<String, serde_json::Value>>>()
        .await
        .with_context(|| format!("Failed to parse item {id}"))?;

    match raw {
        Some(fields) if !fields.is_empty() => {
            let item = serde_json::from_value(serde_json::Value::Object(fields))
                .with_context(|| format!("Unexpected shape for item {id}"))?;
            Ok(Some(item))
        }
        _ => {
            tracing::warn!(item_id = id, "Item is empty");
            Ok(None)
        }
    }
}

pub(crate) async fn get_comments(
    base_url: &str,
    story_id: u64,
) -> anyhow::Result<Vec<crate::Comment>> {
    let Some(story) = get_item(base_url, story_id).await? else {
        return Ok(Vec::new());
    };
    let kids = story.kids.unwrap_or_default();

    let mut comments = Vec::with_capacity(kids.len());
    for comment_id in kids {
        if let Some(item) = get_item(base_url, comment_id).await? {
            comments.push(crate::Comment::from(item));
        }
    }

    tracing::info!(story_id, num_comments = comments.len(), "Got comments");
    Ok(comments)
}

pub(crate) async fn get_top_posts(base_url: &str, limit: usize) -> anyhow::Result<Vec<crate::Post>> {
    let story_ids = get_top_story_ids(base_url).await?;
    tracing::info!(num_ids = story_ids.len(), limit, "Got top story ids");

    let mut posts = Vec::with_capacity(limit.min(story_ids.len()));
    for story_id in story_ids.into_iter().take(limit) {
        match get_item(base_url, story_id).await? {
            Some(item) => posts.push(crate::Post::try_from(item)?),
            None => tracing::warn!(story_id, "Skipping empty story"),
        }
    }

    Ok(posts)
}
