use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::{
    calculator::{
        AutoAttributor, AutoEstimate, EndgameAttributor, EndgameEstimate, PhaseAttributor,
        TeleopAttributor, TeleopEstimate,
    },
    classifier::{AllianceSeatClassifier, MatchClassifier, SeatAssignment},
    config::MetricsConfig,
    error::Result,
    models::{MatchContribution, MatchRecord, MatchResult, PhasePoints, TeamPerformanceProfile},
    stats,
};

/// Full attribution of one match to one team
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAttribution {
    pub auto: AutoEstimate,
    pub teleop: TeleopEstimate,
    pub endgame: EndgameEstimate,
    pub contribution: MatchContribution,
}

/// Folds a team's match history into a [`TeamPerformanceProfile`]
pub struct PerformanceAggregator<C = AllianceSeatClassifier> {
    config: MetricsConfig,
    classifier: C,
    auto: AutoAttributor,
    teleop: TeleopAttributor,
    endgame: EndgameAttributor,
    /// Built on the first batch and reused afterwards
    pool: OnceLock<ThreadPool>,
}

impl PerformanceAggregator {
    pub fn new(config: MetricsConfig) -> Self {
        Self::with_classifier(config, AllianceSeatClassifier::new())
    }
}

impl Default for PerformanceAggregator {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

impl<C: MatchClassifier> PerformanceAggregator<C> {
    pub fn with_classifier(config: MetricsConfig, classifier: C) -> Self {
        let auto = AutoAttributor::new(&config.scoring);
        let teleop = TeleopAttributor::new(&config.scoring);
        let endgame = EndgameAttributor::new(&config.scoring);

        Self { config, classifier, auto, teleop, endgame, pool: OnceLock::new() }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Compute the performance profile of `team_key` over `matches`, in order.
    ///
    /// Matches the team did not play are skipped.
    pub fn compute_profile(
        &self,
        matches: &[MatchRecord],
        team_key: &str,
    ) -> TeamPerformanceProfile {
        let profile = matches
            .iter()
            .fold(ProfileAccumulator::new(team_key), |acc, record| {
                match self.classifier.classify(record, team_key) {
                    Some(assignment) => acc.absorb(self.attribute_match(record, assignment)),
                    None => acc,
                }
            })
            .finish();

        info!(
            "Computed profile for {}: {} matches ({}W-{}L), {:.1} pts/match, consistency {:.3}",
            profile.team_key,
            profile.matches_played,
            profile.wins,
            profile.losses,
            profile.overall_metrics.avg_points_per_match,
            profile.overall_metrics.consistency_rating
        );

        profile
    }

    /// Run the three phase attributors for a classified match
    pub fn attribute_match(
        &self,
        record: &MatchRecord,
        assignment: SeatAssignment,
    ) -> MatchAttribution {
        let SeatAssignment { alliance, seat } = assignment;
        let breakdown = record.breakdown(alliance);

        let auto = self.auto.attribute(breakdown, seat);
        let teleop = self.teleop.attribute(breakdown, seat);
        let endgame = self.endgame.attribute(breakdown, seat);

        let estimated_points = PhasePoints::new(auto.points, teleop.points, endgame.points);
        let alliance_total = breakdown.total_points;
        let contribution_percentage = if alliance_total > 0 {
            estimated_points.total / alliance_total as f64
        } else {
            0.0
        };

        debug!(
            "Match {}: {} seat {} est {:.2}/{} pts ({:.1}%)",
            record.key,
            alliance,
            seat,
            estimated_points.total,
            alliance_total,
            contribution_percentage * 100.0
        );

        MatchAttribution {
            auto,
            teleop,
            endgame,
            contribution: MatchContribution {
                match_key: record.key.clone(),
                alliance,
                robot_position: seat,
                result: record.result_for(alliance),
                auto_line: auto.crossed_line,
                endgame: endgame.state,
                estimated_points,
                alliance_total,
                contribution_percentage,
                played_at: record.played_at,
            },
        }
    }
}

impl<C: MatchClassifier + Sync> PerformanceAggregator<C> {
    /// Compute profiles for several teams in parallel; output follows `team_keys` order
    pub fn compute_profiles(
        &self,
        matches: &[MatchRecord],
        team_keys: &[String],
    ) -> Result<Vec<TeamPerformanceProfile>> {
        let pool = self.thread_pool()?;

        info!(
            "Computing {} team profiles over {} matches on {} threads",
            team_keys.len(),
            matches.len(),
            pool.current_num_threads()
        );

        Ok(pool.install(|| {
            team_keys.par_iter().map(|team_key| self.compute_profile(matches, team_key)).collect()
        }))
    }

    pub(crate) fn thread_pool(&self) -> Result<&ThreadPool> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }

        let pool =
            ThreadPoolBuilder::new().num_threads(self.config.processing.thread_pool_size).build()?;
        debug!("Built batch thread pool with {} threads", pool.current_num_threads());
        Ok(self.pool.get_or_init(|| pool))
    }
}

/// Running state of the fold. Owned and moved through each step.
struct ProfileAccumulator {
    profile: TeamPerformanceProfile,
    contribution_percentages: Vec<f64>,
}

impl ProfileAccumulator {
    fn new(team_key: &str) -> Self {
        Self {
            profile: TeamPerformanceProfile::empty(team_key),
            contribution_percentages: Vec::new(),
        }
    }

    fn absorb(mut self, attribution: MatchAttribution) -> Self {
        let MatchAttribution { auto, teleop, endgame, contribution } = attribution;
        let profile = &mut self.profile;

        profile.matches_played += 1;
        match contribution.result {
            MatchResult::Win => profile.wins += 1,
            MatchResult::Loss => profile.losses += 1,
        }

        let auto_perf = &mut profile.auto_performance;
        if auto.crossed_line {
            auto_perf.auto_line_crosses += 1;
        }
        auto_perf.total_auto_points += auto.points;
        auto_perf.auto_coral_count += auto.coral_count;

        let teleop_perf = &mut profile.teleop_performance;
        teleop_perf.total_teleop_points += teleop.points;
        teleop_perf.total_coral_count += teleop.coral_count;
        teleop_perf.reef_placements.add(&teleop.reef);

        let endgame_perf = &mut profile.endgame_performance;
        endgame_perf.record(endgame.state);
        endgame_perf.total_endgame_points += endgame.points;

        profile.overall_metrics.total_estimated_points += contribution.estimated_points.total;
        self.contribution_percentages.push(contribution.contribution_percentage);
        profile.match_history.push(contribution);

        self
    }

    fn finish(self) -> TeamPerformanceProfile {
        let Self { mut profile, contribution_percentages } = self;
        let played = profile.matches_played;

        if played == 0 {
            return profile;
        }

        let auto = &mut profile.auto_performance;
        auto.line_cross_success_rate = stats::rate(auto.auto_line_crosses as f64, played);
        auto.avg_auto_contribution = stats::rate(auto.total_auto_points, played);
        auto.auto_coral_per_match = stats::rate(auto.auto_coral_count, played);

        let teleop = &mut profile.teleop_performance;
        teleop.avg_teleop_contribution = stats::rate(teleop.total_teleop_points, played);
        teleop.estimated_coral_per_match = stats::rate(teleop.total_coral_count, played);
        teleop.reef_placements_per_match = teleop.reef_placements.scaled(1.0 / played as f64);

        let endgame = &mut profile.endgame_performance;
        endgame.parked_rate = stats::rate(endgame.parked_count as f64, played);
        endgame.deep_cage_rate = stats::rate(endgame.deep_cage_count as f64, played);
        endgame.shallow_cage_rate = stats::rate(endgame.shallow_cage_count as f64, played);
        endgame.none_rate = stats::rate(endgame.none_count as f64, played);
        endgame.avg_endgame_points = stats::rate(endgame.total_endgame_points, played);

        let overall = &mut profile.overall_metrics;
        overall.avg_points_per_match = stats::rate(overall.total_estimated_points, played);
        overall.avg_contribution_percentage = stats::mean(&contribution_percentages);
        overall.consistency_rating = stats::consistency_rating(&contribution_percentages);
        overall.contribution_percentages = contribution_percentages;

        profile
    }
}
