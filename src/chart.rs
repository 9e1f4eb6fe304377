//! Terminal histogram of story scores.

pub(crate) const NUM_BUCKETS: usize = 20;
const MAX_BAR_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bucket {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) count: usize,
}

/// Splits `[min, max]` into `num_buckets` equal-width buckets. Every bucket is
/// half-open except the last, which also holds `max`. A single distinct value
/// gets the range `[value - 0.5, value + 0.5]`.
pub(crate) fn histogram(values: &[i64], num_buckets: usize) -> Vec<Bucket> {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if num_buckets == 0 {
        return Vec::new();
    }

    let (lower, upper) = if min == max {
        (*min as f64 - 0.5, *max as f64 + 0.5)
    } else {
        (*min as f64, *max as f64)
    };
    let span = upper - lower;

    let mut buckets: Vec<Bucket> = (0..num_buckets)
        .map(|i| Bucket {
            lower: lower + span * i as f64 / num_buckets as f64,
            upper: lower + span * (i + 1) as f64 / num_buckets as f64,
            count: 0,
        })
        .collect();

    for value in values {
        let index = ((*value as f64 - lower) * num_buckets as f64 / span) as usize;
        buckets[index.min(num_buckets - 1)].count += 1;
    }

    buckets
}

pub(crate) fn plot_score_distribution(
    out: &mut impl std::io::Write,
    posts: &[crate::Post],
) -> anyhow::Result<()> {
    let scores: Vec<i64> = posts.iter().map(|post| post.score).collect();
    let buckets = histogram(&scores, NUM_BUCKETS);
    tracing::debug!(num_scores = scores.len(), "Plotting score distribution");

    writeln!(out, "\nDistribution of Post Scores\n")?;
    if buckets.is_empty() {
        writeln!(out, "No scores to plot.")?;
        return Ok(());
    }

    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    writeln!(out, "{:>21} | Frequency", "Score")?;
    for bucket in &buckets {
        let width = bucket.count * MAX_BAR_WIDTH / max_count;
        writeln!(
            out,
            "{:>9.1} - {:>9.1} | {} {}",
            bucket.lower,
            bucket.upper,
            "#".repeat(width),
            bucket.count
        )?;
    }

    Ok(())
}
