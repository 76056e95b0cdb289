// ABOUTME: Catalog of opening types that can be placed in a measurement grid.
// ABOUTME: Maps stable string ids to display names; ids are what gets persisted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A catalog opening type (window, door, mirror, fixed panel...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningType {
    PanoFijo,
    Sliding2,
    Sliding3,
    Sliding4,
    Desplazable,
    Oscilobatiente,
    PuertaPivotIzq,
    PuertaPivotDer,
    VentanaRebatir1Izq,
    VentanaRebatir1Der,
    VentanaRebatir2Izq,
    VentanaRebatir2Der,
    PuertaRebatir1Izq,
    PuertaRebatir1Der,
    PuertaRebatir1MediaIzq,
    PuertaRebatir1MediaDer,
    PuertaRebatir1CiegaIzq,
    PuertaRebatir1CiegaDer,
    PuertaRebatir2Izq,
    PuertaRebatir2Der,
    PuertaRebatir2MediaIzq,
    PuertaRebatir2MediaDer,
    PuertaRebatir2CiegaIzq,
    PuertaRebatir2CiegaDer,
    Ventiluz,
    Banderola,
    EspejoRedondo,
    EspejoRecto,
    MamparaFija,
    MamparaAbrirIzq,
    MamparaAbrirDer,
    MamparaCorrediza,
    VidrieraFija,
    PuertaVidrioZocalonIzq,
    PuertaVidrioZocalonDer,
}

impl OpeningType {
    /// All opening types in catalog (picker) order
    pub fn all() -> &'static [OpeningType] {
        use OpeningType::*;
        &[
            PanoFijo,
            Sliding2,
            Sliding3,
            Sliding4,
            Desplazable,
            Oscilobatiente,
            PuertaPivotIzq,
            PuertaPivotDer,
            VentanaRebatir1Izq,
            VentanaRebatir1Der,
            VentanaRebatir2Izq,
            VentanaRebatir2Der,
            PuertaRebatir1Izq,
            PuertaRebatir1Der,
            PuertaRebatir1MediaIzq,
            PuertaRebatir1MediaDer,
            PuertaRebatir1CiegaIzq,
            PuertaRebatir1CiegaDer,
            PuertaRebatir2Izq,
            PuertaRebatir2Der,
            PuertaRebatir2MediaIzq,
            PuertaRebatir2MediaDer,
            PuertaRebatir2CiegaIzq,
            PuertaRebatir2CiegaDer,
            Ventiluz,
            Banderola,
            EspejoRedondo,
            EspejoRecto,
            MamparaFija,
            MamparaAbrirIzq,
            MamparaAbrirDer,
            MamparaCorrediza,
            VidrieraFija,
            PuertaVidrioZocalonIzq,
            PuertaVidrioZocalonDer,
        ]
    }

    /// Stable id used in stored records
    pub fn id(&self) -> &'static str {
        use OpeningType::*;
        match self {
            PanoFijo => "pano_fijo",
            Sliding2 => "sliding_2",
            Sliding3 => "sliding_3",
            Sliding4 => "sliding_4",
            Desplazable => "desplazable",
            Oscilobatiente => "oscilobatiente",
            PuertaPivotIzq => "puerta_pivot_izq",
            PuertaPivotDer => "puerta_pivot_der",
            VentanaRebatir1Izq => "ventana_rebatir_1_izq",
            VentanaRebatir1Der => "ventana_rebatir_1_der",
            VentanaRebatir2Izq => "ventana_rebatir_2_izq",
            VentanaRebatir2Der => "ventana_rebatir_2_der",
            PuertaRebatir1Izq => "puerta_rebatir_1_izq",
            PuertaRebatir1Der => "puerta_rebatir_1_der",
            PuertaRebatir1MediaIzq => "puerta_rebatir_1_media_izq",
            PuertaRebatir1MediaDer => "puerta_rebatir_1_media_der",
            PuertaRebatir1CiegaIzq => "puerta_rebatir_1_ciega_izq",
            PuertaRebatir1CiegaDer => "puerta_rebatir_1_ciega_der",
            PuertaRebatir2Izq => "puerta_rebatir_2_izq",
            PuertaRebatir2Der => "puerta_rebatir_2_der",
            PuertaRebatir2MediaIzq => "puerta_rebatir_2_media_izq",
            PuertaRebatir2MediaDer => "puerta_rebatir_2_media_der",
            PuertaRebatir2CiegaIzq => "puerta_rebatir_2_ciega_izq",
            PuertaRebatir2CiegaDer => "puerta_rebatir_2_ciega_der",
            Ventiluz => "ventiluz",
            Banderola => "banderola",
            EspejoRedondo => "espejo_redondo",
            EspejoRecto => "espejo_recto",
            MamparaFija => "mampara_fija",
            MamparaAbrirIzq => "mampara_abrir_izq",
            MamparaAbrirDer => "mampara_abrir_der",
            MamparaCorrediza => "mampara_corrediza",
            VidrieraFija => "vidriera_fija",
            PuertaVidrioZocalonIzq => "puerta_vidrio_zocalon_izq",
            PuertaVidrioZocalonDer => "puerta_vidrio_zocalon_der",
        }
    }

    pub fn label(&self) -> &'static str {
        use OpeningType::*;
        match self {
            PanoFijo => "PAÑO FIJO",
            Sliding2 => "CORREDIZA 2 HOJAS",
            Sliding3 => "CORREDIZA 3 HOJAS",
            Sliding4 => "CORREDIZA 4 HOJAS",
            Desplazable => "DESPLAZABLE",
            Oscilobatiente => "OSCILOBATIENTE",
            PuertaPivotIzq => "PT PIVOT (IZQ)",
            PuertaPivotDer => "PT PIVOT (DER)",
            VentanaRebatir1Izq => "VT REBATIR 1H (IZQ)",
            VentanaRebatir1Der => "VT REBATIR 1H (DER)",
            VentanaRebatir2Izq => "VT REBATIR 2H (IZQ ACT)",
            VentanaRebatir2Der => "VT REBATIR 2H (DER ACT)",
            PuertaRebatir1Izq => "PT REBATIR 1H (IZQ)",
            PuertaRebatir1Der => "PT REBATIR 1H (DER)",
            PuertaRebatir1MediaIzq => "PT 1H MEDIA (IZQ)",
            PuertaRebatir1MediaDer => "PT 1H MEDIA (DER)",
            PuertaRebatir1CiegaIzq => "PT 1H CIEGA (IZQ)",
            PuertaRebatir1CiegaDer => "PT 1H CIEGA (DER)",
            PuertaRebatir2Izq => "PT 2H (IZQ ACT)",
            PuertaRebatir2Der => "PT 2H (DER ACT)",
            PuertaRebatir2MediaIzq => "PT 2H MEDIA (IZQ ACT)",
            PuertaRebatir2MediaDer => "PT 2H MEDIA (DER ACT)",
            PuertaRebatir2CiegaIzq => "PT 2H CIEGA (IZQ ACT)",
            PuertaRebatir2CiegaDer => "PT 2H CIEGA (DER ACT)",
            Ventiluz => "VENTILUZ",
            Banderola => "BANDEROLA",
            EspejoRedondo => "ESPEJO REDONDO",
            EspejoRecto => "ESPEJO RECTO",
            MamparaFija => "MAMPARA FIJA",
            MamparaAbrirIzq => "MAMPARA ABRIR (IZQ)",
            MamparaAbrirDer => "MAMPARA ABRIR (DER)",
            MamparaCorrediza => "MAMPARA CORREDIZA",
            VidrieraFija => "VIDRIERA FIJA",
            PuertaVidrioZocalonIzq => "PT VIDRIO ZOCALON (IZQ)",
            PuertaVidrioZocalonDer => "PT VIDRIO ZOCALON (DER)",
        }
    }

    pub fn from_id(id: &str) -> Option<OpeningType> {
        Self::all().iter().copied().find(|t| t.id() == id)
    }
}

impl fmt::Display for OpeningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown opening type: {0}")]
pub struct UnknownOpeningType(pub String);

impl FromStr for OpeningType {
    type Err = UnknownOpeningType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s.trim()).ok_or_else(|| UnknownOpeningType(s.to_string()))
    }
}

impl Serialize for OpeningType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for OpeningType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        OpeningType::from_id(&id).ok_or_else(|| serde::de::Error::custom(UnknownOpeningType(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let all = OpeningType::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
        assert_eq!(all.len(), 35);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(OpeningType::from_id("pano_fijo"), Some(OpeningType::PanoFijo));
        assert_eq!("sliding_2".parse::<OpeningType>(), Ok(OpeningType::Sliding2));
        assert!("ventana_magica".parse::<OpeningType>().is_err());
    }

    #[test]
    fn serializes_as_id() {
        let json = serde_json::to_string(&OpeningType::VentanaRebatir1Izq).unwrap();
        assert_eq!(json, "\"ventana_rebatir_1_izq\"");

        let parsed: OpeningType = serde_json::from_str("\"mampara_corrediza\"").unwrap();
        assert_eq!(parsed, OpeningType::MamparaCorrediza);

        assert!(serde_json::from_str::<OpeningType>("\"nope\"").is_err());
    }
}
