// ==========================================
// LTS 化验分析系统 - 领域类型定义
// ==========================================
// 依据: 化验表单六个工艺物流页签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工艺物流模块 (Module Kind)
// ==========================================
// 顺序与表单页签一致,不可调整
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleKind {
    NaturalGas,         // 天然气
    StabilizedGasoline, // 稳定汽油
    Meg,                // 乙二醇
    Teg,                // 三甘醇
    DemineralizedWater, // 除盐水
    Amines,             // 胺液
}

impl ModuleKind {
    /// 全部模块（页签顺序）
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::NaturalGas,
        ModuleKind::StabilizedGasoline,
        ModuleKind::Meg,
        ModuleKind::Teg,
        ModuleKind::DemineralizedWater,
        ModuleKind::Amines,
    ];

    /// 稳定的 ASCII 标识（配置、命令行、i18n key 共用）
    pub fn code(&self) -> &'static str {
        match self {
            ModuleKind::NaturalGas => "natural_gas",
            ModuleKind::StabilizedGasoline => "gasoline",
            ModuleKind::Meg => "meg",
            ModuleKind::Teg => "teg",
            ModuleKind::DemineralizedWater => "demin_water",
            ModuleKind::Amines => "amines",
        }
    }

    /// 报告文件名前缀
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ModuleKind::NaturalGas => "GasNatural",
            ModuleKind::StabilizedGasoline => "Gasolina",
            ModuleKind::Meg => "MEG",
            ModuleKind::Teg => "TEG",
            ModuleKind::DemineralizedWater => "AguaDemi",
            ModuleKind::Amines => "Aminas",
        }
    }

    /// 模块名称的 i18n key
    pub fn name_key(&self) -> String {
        format!("module.{}.name", self.code())
    }

    /// 技术说明的 i18n key
    pub fn explanation_key(&self) -> String {
        format!("module.{}.explanation", self.code())
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    /// 解析模块标识,同时接受文件名前缀（忽略大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        ModuleKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.code() == needle || kind.file_prefix().to_lowercase() == needle
            })
            .ok_or_else(|| format!("未知模块: {}", s))
    }
}

// ==========================================
// 判定结果 (Verdict)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass, // 合格
    Fail, // 不合格
}

impl Verdict {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// 结构化标签
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "OK",
            Verdict::Fail => "FAIL",
        }
    }

    /// 表格显示用标记（报告中经规范化后为 OK / NO）
    pub fn mark(&self) -> &'static str {
        match self {
            Verdict::Pass => "✅",
            Verdict::Fail => "❌",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
