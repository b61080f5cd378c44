use family_quest::error::AppError;
use family_quest::progression::{
    DashboardStats, FamilyId, FamilyProgress, LeaderboardEntry, ProgressionEngine,
    RecentActivity, RewardEvaluation, SnapshotError,
};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(SnapshotError::from)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn render_leaderboard(entries: &[LeaderboardEntry], json: bool) -> Result<(), AppError> {
    if json {
        return print_json(entries);
    }

    println!("Family leaderboard");
    if entries.is_empty() {
        println!("- no families recorded");
    }
    for entry in entries {
        println!(
            "{:>2}. {} - {} pts | {} tasks completed | {} badges",
            entry.rank, entry.name, entry.sum_score, entry.completed_tasks, entry.badge_count
        );
    }
    Ok(())
}

pub(crate) fn render_family(progress: &FamilyProgress, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(progress);
    }

    println!("{} (family {})", progress.name, progress.family_id);
    println!(
        "Score: {} pts from {} completed tasks",
        progress.score, progress.completed_tasks
    );

    if progress.earned_badges.is_empty() {
        println!("\nBadges: none earned yet");
    } else {
        println!("\nBadges");
        for badge in &progress.earned_badges {
            println!("- {} [{}]", badge.title, badge.icon);
        }
    }

    println!("\nCurrent levels");
    for category in &progress.current_levels {
        match &category.level {
            Some(level) => println!(
                "- {}: level {} {} ({} pts)",
                category.asset_type_name, level.level_number, level.name, level.required_points
            ),
            None => println!("- {}: no level reached", category.asset_type_name),
        }
    }

    if progress.available_levels.is_empty() {
        println!("\nAvailable levels: none");
    } else {
        println!("\nAvailable levels");
        for level in &progress.available_levels {
            println!("- {} (level {})", level.name, level.level_number);
        }
    }
    Ok(())
}

pub(crate) fn render_rewards(
    engine: &ProgressionEngine,
    family_id: FamilyId,
    evaluations: &[RewardEvaluation],
    json: bool,
) -> Result<(), AppError> {
    if json {
        return print_json(evaluations);
    }

    let name = engine
        .store()
        .family(family_id)
        .map_or("unknown family", |family| family.name.as_str());
    println!("Rewards for {name}");
    if evaluations.is_empty() {
        println!("- no rewards configured");
    }
    for evaluation in evaluations {
        let verdict = if evaluation.eligible {
            "ELIGIBLE"
        } else {
            "locked"
        };
        println!(
            "- [{}] {} ({}: {})",
            verdict, evaluation.title, evaluation.policy, evaluation.explanation
        );
        println!(
            "    level {} | score {} | badge {}",
            evaluation.criteria.level.label(),
            evaluation.criteria.score.label(),
            evaluation.criteria.badge.label()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsView<'a> {
    stats: &'a DashboardStats,
    recent_activity: &'a [RecentActivity],
}

pub(crate) fn render_stats(
    stats: &DashboardStats,
    activity: &[RecentActivity],
    json: bool,
) -> Result<(), AppError> {
    if json {
        return print_json(&StatsView {
            stats,
            recent_activity: activity,
        });
    }

    println!("Dashboard");
    println!("- {} families", stats.families);
    println!("- {} tasks", stats.tasks);
    println!("- {} completed assignments", stats.completed_assignments);
    println!("- {} badges", stats.badges);
    println!("- {} scores", stats.scores);

    if activity.is_empty() {
        println!("\nRecent activity: none");
        return Ok(());
    }

    println!("\nRecent activity");
    for entry in activity {
        println!(
            "- {} completed \"{}\" at {}",
            entry.family_name.as_deref().unwrap_or("Unknown family"),
            entry.task_title.as_deref().unwrap_or("Unknown task"),
            entry.completed_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
