//! Server-side validation of reported level runs.
//!
//! Reported scores are clamped to what the level config makes possible and
//! stars are recomputed from the config thresholds. A run against a level
//! with no config falls back to a tunable orders-based ceiling. Clamps are
//! logged and the clamped values used; a suspicious report never hard-fails
//! the request.

use crate::catalog::worlds::LevelConfig;
use crate::catalog::Catalog;

/// Client-reported outcome of a level run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub level_id: u32,
    pub score: u32,
    pub stars: u8,
    pub orders_completed: u32,
}

/// What the server accepts as the real outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRun {
    pub score: u32,
    pub stars: u8,
    pub orders: u32,
}

/// Most orders a config allows: one per interval for the whole timer.
pub fn max_possible_orders(config: &LevelConfig) -> u32 {
    let interval = config.order_interval.max(1);
    config.time.div_ceil(interval)
}

/// Highest score a config allows: every possible order at the best
/// recipe's points, plus slack for combo bonuses.
pub fn max_possible_score(config: &LevelConfig) -> u32 {
    if let Some(explicit) = config.max_score {
        return explicit;
    }
    let max_recipe_points = config.recipes.iter().map(|r| r.points).max().unwrap_or(0);
    max_possible_orders(config) * max_recipe_points + 1000
}

fn stars_from_thresholds(config: &LevelConfig, score: u32) -> u8 {
    if score >= config.star3 {
        3
    } else if score >= config.star2 {
        2
    } else if score >= config.star1 {
        1
    } else {
        0
    }
}

pub fn validate_run(catalog: &Catalog, report: &RunReport) -> ValidatedRun {
    match catalog.level_config(report.level_id) {
        Some(config) => {
            let order_ceiling = max_possible_orders(config);
            let orders = if report.orders_completed > order_ceiling {
                log::warn!(
                    "level {} reports {} orders, timer allows {}, clamping",
                    report.level_id,
                    report.orders_completed,
                    order_ceiling
                );
                order_ceiling
            } else {
                report.orders_completed
            };
            let ceiling = max_possible_score(config);
            let score = if report.score > ceiling {
                log::warn!(
                    "level {} score {} exceeds ceiling {}, clamping",
                    report.level_id,
                    report.score,
                    ceiling
                );
                ceiling
            } else {
                report.score
            };
            // Stars come from the config no matter what the client said.
            let stars = stars_from_thresholds(config, score);
            if stars != report.stars.min(3) {
                log::warn!(
                    "level {} reported {} stars, thresholds give {}",
                    report.level_id,
                    report.stars,
                    stars
                );
            }
            ValidatedRun {
                score,
                stars,
                orders,
            }
        }
        None => {
            let fallback = &catalog.fallback;
            let orders = if report.orders_completed > fallback.max_orders {
                log::warn!(
                    "level {} has no config; {} orders exceeds ceiling {}, clamping",
                    report.level_id,
                    report.orders_completed,
                    fallback.max_orders
                );
                fallback.max_orders
            } else {
                report.orders_completed
            };
            let ceiling = orders * fallback.score_per_order + fallback.score_base;
            // The star cap punishes implausible scores only; an honest run
            // keeps its reported stars.
            let (score, stars) = if report.score > ceiling {
                log::warn!(
                    "level {} has no config; score {} exceeds heuristic ceiling {}, clamping",
                    report.level_id,
                    report.score,
                    ceiling
                );
                (ceiling, report.stars.min(fallback.star_cap).min(3))
            } else {
                (report.score, report.stars.min(3))
            };
            ValidatedRun {
                score,
                stars,
                orders,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(level_id: u32, score: u32, stars: u8, orders: u32) -> RunReport {
        RunReport {
            level_id,
            score,
            stars,
            orders_completed: orders,
        }
    }

    #[test]
    fn honest_run_passes_untouched() {
        let catalog = Catalog::standard();
        let run = validate_run(&catalog, &report(1, 450, 1, 3));
        assert_eq!(run.score, 450);
        assert_eq!(run.stars, 1);
    }

    #[test]
    fn inflated_score_clamps_to_config_ceiling() {
        let catalog = Catalog::standard();
        // Level 1: time 120, interval 50 -> 3 orders max at 60 pts = 180 + 1000.
        let run = validate_run(&catalog, &report(1, 1_000_000, 3, 3));
        assert_eq!(run.score, 1180);
        assert_eq!(run.stars, 3);
    }

    #[test]
    fn stars_are_recomputed_not_trusted() {
        let catalog = Catalog::standard();
        // 350 < star1 (400) on level 1, regardless of the claimed 3 stars.
        let run = validate_run(&catalog, &report(1, 350, 3, 2));
        assert_eq!(run.stars, 0);
    }

    #[test]
    fn unknown_level_uses_orders_heuristic() {
        let catalog = Catalog::standard();
        let run = validate_run(&catalog, &report(999, 9999, 3, 4));
        // 4 * 500 + 1000 ceiling, stars capped at 2.
        assert_eq!(run.score, 3000);
        assert_eq!(run.stars, 2);

        let honest = validate_run(&catalog, &report(999, 1500, 1, 4));
        assert_eq!(honest.score, 1500);
        assert_eq!(honest.stars, 1);
    }

    #[test]
    fn honest_run_on_unknown_level_keeps_three_stars() {
        let catalog = Catalog::standard();
        // Within the 4-order ceiling, so the star cap does not apply.
        let run = validate_run(&catalog, &report(999, 2800, 3, 4));
        assert_eq!(run.score, 2800);
        assert_eq!(run.stars, 3);
    }

    #[test]
    fn order_counts_are_clamped_to_the_timer() {
        let catalog = Catalog::standard();
        // Level 1: 120s at one order per 50s -> 3 orders max.
        let run = validate_run(&catalog, &report(1, 450, 1, 1_000_000));
        assert_eq!(run.orders, 3);

        let honest = validate_run(&catalog, &report(1, 450, 1, 2));
        assert_eq!(honest.orders, 2);

        // No config: the tunable ceiling bounds the count.
        let fallback = validate_run(&catalog, &report(999, 1500, 1, u32::MAX));
        assert_eq!(fallback.orders, catalog.fallback.max_orders);
    }
}
