// ==========================================
// LTS 化验分析系统 - 模块化验请求
// ==========================================
// 每个模块一个显式请求对象,按值传入规则表,
// 模块之间/会话之间不共享任何输入状态
// ==========================================

use crate::domain::analysis::Measurements;
use crate::domain::types::ModuleKind;
use serde::{Deserialize, Serialize};

/// 天然气: H₂S (ppm), CO₂ (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalGasSample {
    pub h2s_ppm: f64,
    pub co2_pct: f64,
}

/// 稳定汽油: TVR (psia), 盐含量 (mg/m²), 水和沉淀物 (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasolineSample {
    pub tvr_psia: f64,
    pub salts_mg_m2: f64,
    pub water_sediment_pct: f64,
}

/// 乙二醇: pH, 浓度 (%wt), 氯离子 (ppm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MegSample {
    pub ph: f64,
    pub concentration_pct: f64,
    pub chlorides_ppm: f64,
}

/// 三甘醇: 字段同 MEG,阈值不同
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TegSample {
    pub ph: f64,
    pub concentration_pct: f64,
    pub chlorides_ppm: f64,
}

/// 除盐水: 氯离子 (ppm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeminWaterSample {
    pub chlorides_ppm: f64,
}

/// 胺液
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AminesSample {
    pub concentration_pct: f64,
    pub chlorides_amine_ppm: f64,
    pub chlorides_boiler_ppm: f64,
    pub lean_loading_mol_mol: f64,
    pub rich_loading_mol_mol: f64,
}

// ==========================================
// ModuleRequest - 化验请求
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module", content = "sample", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleRequest {
    NaturalGas(NaturalGasSample),
    StabilizedGasoline(GasolineSample),
    Meg(MegSample),
    Teg(TegSample),
    DemineralizedWater(DeminWaterSample),
    Amines(AminesSample),
}

impl ModuleRequest {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleRequest::NaturalGas(_) => ModuleKind::NaturalGas,
            ModuleRequest::StabilizedGasoline(_) => ModuleKind::StabilizedGasoline,
            ModuleRequest::Meg(_) => ModuleKind::Meg,
            ModuleRequest::Teg(_) => ModuleKind::Teg,
            ModuleRequest::DemineralizedWater(_) => ModuleKind::DemineralizedWater,
            ModuleRequest::Amines(_) => ModuleKind::Amines,
        }
    }

    /// 转换为按参数 key 索引的测量值（顺序与规则表一致）
    pub fn measurements(&self) -> Measurements {
        match *self {
            ModuleRequest::NaturalGas(s) => Measurements::new()
                .with("h2s", s.h2s_ppm)
                .with("co2", s.co2_pct),
            ModuleRequest::StabilizedGasoline(s) => Measurements::new()
                .with("tvr", s.tvr_psia)
                .with("salts", s.salts_mg_m2)
                .with("water_sediment", s.water_sediment_pct),
            ModuleRequest::Meg(MegSample {
                ph,
                concentration_pct,
                chlorides_ppm,
            })
            | ModuleRequest::Teg(TegSample {
                ph,
                concentration_pct,
                chlorides_ppm,
            }) => Measurements::new()
                .with("ph", ph)
                .with("concentration", concentration_pct)
                .with("chlorides", chlorides_ppm),
            ModuleRequest::DemineralizedWater(s) => {
                Measurements::new().with("chlorides", s.chlorides_ppm)
            }
            ModuleRequest::Amines(s) => Measurements::new()
                .with("concentration", s.concentration_pct)
                .with("chlorides_amine", s.chlorides_amine_ppm)
                .with("chlorides_boiler", s.chlorides_boiler_ppm)
                .with("lean_loading", s.lean_loading_mol_mol)
                .with("rich_loading", s.rich_loading_mol_mol),
        }
    }
}
