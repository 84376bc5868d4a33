//! Rendering options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Graphviz `rankdir`: the direction ranks are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    #[serde(rename = "LR", alias = "lr")]
    LeftRight,
    #[serde(rename = "TB", alias = "tb")]
    TopBottom,
    #[serde(rename = "RL", alias = "rl")]
    RightLeft,
    #[serde(rename = "BT", alias = "bt")]
    BottomTop,
}

impl RankDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankDir::LeftRight => "LR",
            RankDir::TopBottom => "TB",
            RankDir::RightLeft => "RL",
            RankDir::BottomTop => "BT",
        }
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LR" => Ok(RankDir::LeftRight),
            "TB" => Ok(RankDir::TopBottom),
            "RL" => Ok(RankDir::RightLeft),
            "BT" => Ok(RankDir::BottomTop),
            other => Err(format!(
                "invalid rank direction '{}' (expected LR, TB, RL or BT)",
                other
            )),
        }
    }
}

/// Options controlling what the builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit a rank-aligned row of team nodes as a legend.
    pub include_team_legend: bool,
    /// Fill component nodes with their team's display colors.
    pub style_by_team: bool,
    pub rank_dir: RankDir,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_team_legend: true,
            style_by_team: true,
            rank_dir: RankDir::default(),
        }
    }
}

impl RenderOptions {
    /// Plain output: no legend and no team colors.
    pub fn plain() -> Self {
        Self {
            include_team_legend: false,
            style_by_team: false,
            rank_dir: RankDir::default(),
        }
    }

    pub fn with_team_legend(mut self, include: bool) -> Self {
        self.include_team_legend = include;
        self
    }

    pub fn with_team_style(mut self, style: bool) -> Self {
        self.style_by_team = style;
        self
    }

    pub fn with_rank_dir(mut self, rank_dir: RankDir) -> Self {
        self.rank_dir = rank_dir;
        self
    }
}
