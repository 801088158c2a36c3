use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The logical collections the API exposes.
///
/// Each variant knows where its rows live in the store and how they are
/// projected, so every query in the system is built from this static
/// catalogue and never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Animals,
    Events,
    Assessments,
    Weighings,
    Immunizations,
    Treatments,
    Files,
}

/// Ordering direction for a query's date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Resource {
    /// All sub-resources of an animal, in the order the API lists them.
    pub const ANIMAL_CHILDREN: [Resource; 6] = [
        Resource::Events,
        Resource::Assessments,
        Resource::Weighings,
        Resource::Immunizations,
        Resource::Treatments,
        Resource::Files,
    ];

    /// The table or view backing this resource.
    pub fn source(&self) -> &'static str {
        match self {
            Resource::Animals => "animals_view",
            Resource::Events => "animal_eventos",
            Resource::Assessments => "animal_avaliacoes",
            Resource::Weighings => "animal_pesagens",
            Resource::Immunizations => "animal_imunizacoes",
            Resource::Treatments => "animal_tratamentos",
            Resource::Files => "animal_arquivos",
        }
    }

    /// The projected column expressions, including legacy-to-canonical aliases.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Resource::Animals => &[
                "id",
                "nome AS name",
                "descricao AS description",
                "foto AS profile_picture_url",
                "nascimento AS birth_date",
                "castrado",
                "vacinado",
                "adotado",
                "falecido AS deceased",
                "internado AS hospitalized",
                "desaparecido AS missing",
                "especie",
                "raça AS breed",
                "porte AS size",
                "sexo",
                "cor",
                "pelagem",
                "peso AS latest_weight",
                "faixa_etaria AS age_range",
            ],
            Resource::Events => &["data", "tipo", "descricao", "veterinario_nome"],
            Resource::Assessments => &[
                "data",
                "observacao",
                "veterinario_nome",
                "temperatura",
                "score",
                "peso",
                "nota",
            ],
            Resource::Weighings => &["id", "data", "peso"],
            Resource::Immunizations => &[
                "data_exibicao",
                "tipo",
                "nome_imunizante",
                "veterinario_nome",
                "aplicada",
            ],
            Resource::Treatments => &["data", "veterinario_nome", "medicamentos", "finalizada"],
            Resource::Files => &["data", "nome", "observacao", "url"],
        }
    }

    /// The column an id filter applies to: the primary key for animals, the
    /// owning animal for everything else.
    pub fn key_column(&self) -> &'static str {
        match self {
            Resource::Animals => "id",
            _ => "animal_id",
        }
    }

    /// The date column used for most-recent-first ordering, if any.
    pub fn date_column(&self) -> Option<&'static str> {
        match self {
            Resource::Animals => None,
            Resource::Immunizations => Some("data_exibicao"),
            _ => Some("data"),
        }
    }

    /// Whether rows of this resource go through the row normalizer.
    pub fn is_animal_shaped(&self) -> bool {
        matches!(self, Resource::Animals)
    }

    /// The URL segment naming this resource under `/animals/{id}/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Resource::Animals => "animals",
            Resource::Events => "eventos",
            Resource::Assessments => "avaliacoes",
            Resource::Weighings => "pesagens",
            Resource::Immunizations => "imunizacoes",
            Resource::Treatments => "tratamentos",
            Resource::Files => "arquivos",
        }
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animals" => Ok(Resource::Animals),
            "eventos" => Ok(Resource::Events),
            "avaliacoes" => Ok(Resource::Assessments),
            "pesagens" => Ok(Resource::Weighings),
            "imunizacoes" => Ok(Resource::Immunizations),
            "tratamentos" => Ok(Resource::Treatments),
            "arquivos" => Ok(Resource::Files),
            other => Err(CoreError::UnknownResource(other.to_string())),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}
