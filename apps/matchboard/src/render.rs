//! Plain-text views for the terminal. Formatting only: every number shown
//! here was computed by the pipeline.

use std::fmt;

use crate::flows::{FileListing, MatchReport, RecommendedJob, SelectionSummary};
use crate::pipeline::{CandidateDetail, RankingBoard};

fn skill_list(skills: &[String]) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.join(", ")
    }
}

pub struct BoardView<'a>(pub &'a RankingBoard);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        writeln!(f, "Ranking for: {}", board.job_title)?;
        writeln!(
            f,
            "Candidates: {}  Average: {}%  Top: {}%",
            board.summary.count, board.summary.average_percentage, board.summary.top_percentage
        )?;
        writeln!(f)?;
        for entry in &board.entries {
            writeln!(
                f,
                "{:>4}  {:>3}% [{}]  {}  ({})  skills {}/{}",
                entry.label,
                entry.percentage,
                entry.tier.badge_class(),
                entry.candidate.name,
                entry.candidate.filename,
                entry.matched_skills,
                entry.required_skills
            )?;
        }
        Ok(())
    }
}

pub struct DetailView<'a>(pub &'a CandidateDetail);

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.0;
        writeln!(f, "{} {}", detail.label, detail.name)?;
        writeln!(f, "  File:     {}", detail.filename)?;
        writeln!(f, "  Contact:  {}", detail.contact)?;
        writeln!(
            f,
            "  Score:    {}% ({})",
            detail.percentage,
            detail.recommendation.tier.as_str()
        )?;
        writeln!(f, "  {}", detail.recommendation.message)?;
        writeln!(
            f,
            "  Matched skills ({}): {}",
            detail.skills.overlap.len(),
            skill_list(&detail.skills.overlap)
        )?;
        writeln!(
            f,
            "  Missing skills ({}): {}",
            detail.skills.missing.len(),
            skill_list(&detail.skills.missing)
        )?;
        writeln!(
            f,
            "  Additional skills ({}): {}",
            detail.skills.extra.len(),
            skill_list(&detail.skills.extra)
        )?;
        writeln!(
            f,
            "  All skills ({}): {}",
            detail.all_skills.len(),
            skill_list(&detail.all_skills)
        )
    }
}

pub struct MatchReportView<'a>(pub &'a MatchReport);

impl fmt::Display for MatchReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Candidate: {}", report.candidate_name)?;
        writeln!(f, "Email:     {}", report.candidate_email)?;
        writeln!(f, "Job:       {}", report.job_title)?;
        writeln!(f, "Match:     {}%", report.percentage)?;
        writeln!(f, "Skills:    {}", report.skills_match())?;
        if let Some(breakdown) = &report.breakdown {
            if let Some(skills) = breakdown.skills_match_score {
                writeln!(f, "Skills score:    {skills:.2}")?;
            }
            if let Some(text) = breakdown.text_similarity_score {
                writeln!(f, "Text similarity: {text:.2}")?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "[{}] {}",
            report.recommendation.style_class, report.recommendation.message
        )?;
        writeln!(f)?;
        writeln!(f, "Matched skills:    {}", skill_list(&report.skills.overlap))?;
        writeln!(f, "Missing skills:    {}", skill_list(&report.skills.missing))?;
        writeln!(f, "Additional skills: {}", skill_list(&report.skills.extra))
    }
}

pub struct SelectionView<'a>(pub &'a SelectionSummary);

impl fmt::Display for SelectionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        match &summary.listing {
            FileListing::Empty => writeln!(f, "No files selected"),
            FileListing::Names(names) => {
                writeln!(f, "{} selected:", summary.label)?;
                for name in names {
                    writeln!(f, "  - {name}")?;
                }
                Ok(())
            }
            FileListing::TooManyToList => {
                writeln!(f, "{} selected (too many to list)", summary.label)
            }
        }
    }
}

pub struct RecommendationsView<'a>(pub &'a [RecommendedJob]);

impl fmt::Display for RecommendationsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No recommendations");
        }
        for job in self.0 {
            writeln!(
                f,
                "{:>3}% [{}]  #{} {}",
                job.percentage,
                job.recommendation.tier.badge_class(),
                job.job_id,
                job.title
            )?;
            writeln!(f, "      matched: {}", skill_list(&job.overlap_skills))?;
            writeln!(f, "      missing: {}", skill_list(&job.missing_skills))?;
        }
        Ok(())
    }
}
