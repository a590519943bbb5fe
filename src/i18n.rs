//! Display labels in the supported languages.
//!
//! Labels are for presentation only and never take part in any calculation.

use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,

    #[value(name = "zh")]
    Chinese,
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Label {
    pub en: &'static str,
    pub zh: &'static str,
}

impl Label {
    pub const fn new(en: &'static str, zh: &'static str) -> Self {
        Self { en, zh }
    }

    /// Label that reads the same in every language.
    pub const fn same(text: &'static str) -> Self {
        Self { en: text, zh: text }
    }

    #[must_use]
    pub const fn get(self, language: Language) -> &'static str {
        match language {
            Language::English => self.en,
            Language::Chinese => self.zh,
        }
    }
}

pub mod messages {
    use super::Label;

    pub const ACTIVE_RULE: Label = Label::new("Active", "当前生效规则");
    pub const ESTIMATED_REBATE: Label = Label::new("Estimated rebate", "预计补贴金额");
    pub const BASE_FACTOR: Label = Label::new("Base STC factor", "基础 STC 系数");
    pub const ELIGIBLE_CAPACITY: Label = Label::new("Eligible usable capacity", "计入可用容量");
    pub const WEIGHTED_CAPACITY: Label = Label::new("Weighted capacity", "加权容量");
    pub const CERTIFICATES: Label = Label::new("STCs", "STC 数量");
    pub const BAND: Label = Label::new("Band", "容量区间");
    pub const CAPACITY: Label = Label::new("Capacity", "容量");
    pub const RATE: Label = Label::new("Rate", "系数效率");
    pub const REBATE: Label = Label::new("Rebate", "补贴");
    pub const PERIOD: Label = Label::new("Period", "时期");
    pub const FACTOR: Label = Label::new("Factor", "系数");
    pub const START: Label = Label::new("Start", "开始");
    pub const END: Label = Label::new("End", "结束");
    pub const MANUFACTURER: Label = Label::new("Manufacturer", "品牌");
    pub const MODEL: Label = Label::new("Model", "型号");
    pub const USABLE: Label = Label::new("Usable", "可用容量");
    pub const UNKNOWN: Label = Label::new("Unknown", "未知");
    pub const NO_MATCHES: Label = Label::new("No matches", "没有匹配结果");
    pub const WARNING: Label = Label::new("Warning", "提示");
}
