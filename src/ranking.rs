use crate::{
    error::AppResult,
    models::{DateRange, TopMovie},
    store::Store,
};

pub async fn top_movies(store: &Store, range: Option<DateRange>) -> AppResult<Vec<TopMovie>> {
    let counts = store.comment_counts(range).await?;
    tracing::debug!(movies = counts.len(), ?range, "ranking movies by comment count");
    Ok(dense_rank(counts))
}

/// Dense ranking on comment count, highest first: `[5, 5, 3, 3, 1]` ranks
/// `[1, 1, 2, 2, 3]`. Equal counts are ordered by ascending movie ID.
pub fn dense_rank(mut counts: Vec<(i32, i64)>) -> Vec<TopMovie> {
    counts.retain(|&(_, total)| total > 0);
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut rank = 0;
    let mut previous = None;
    counts
        .into_iter()
        .map(|(id, total_comments)| {
            if previous != Some(total_comments) {
                rank += 1;
                previous = Some(total_comments);
            }
            TopMovie { id, total_comments, rank }
        })
        .collect()
}
