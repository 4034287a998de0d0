use crate::models::{SpaceCreate, SpaceType};

const ALL_WEEK: &str = "Sábado, Domingo, Feriado ou Dia Útil (08h às 17h)";
const CACHOEIRO_WEEK: &str = "Sábado, Domingo, Dia Útil e Feriado (08h às 17h)";

#[allow(clippy::too_many_arguments)]
fn space(
    name: &str,
    description: &str,
    capacity: i32,
    space_type: SpaceType,
    image_id: u32,
    features: &[&str],
    availability: &str,
    items: &[&str],
) -> SpaceCreate {
    SpaceCreate {
        name: name.to_string(),
        description: description.to_string(),
        capacity,
        price: None,
        space_type,
        image: format!("https://picsum.photos/id/{}/800/600", image_id),
        gallery: Vec::new(),
        video_url: None,
        features: features.iter().map(|f| f.to_string()).collect(),
        availability: Some(availability.to_string()),
        items_included: Some(items.iter().map(|i| i.to_string()).collect()),
    }
}

/// The venue's standard list of spaces, used by "restore defaults".
/// Prices are left for the team to fill in ("Sob consulta").
pub fn default_spaces() -> Vec<SpaceCreate> {
    vec![
        space(
            "Churrasqueiras",
            "Área ideal para confraternizações informais com amigos e família.",
            60,
            SpaceType::Intimate,
            1080,
            &["Área Coberta", "Freezer"],
            ALL_WEEK,
            &["Grelha", "Mesas Rústicas"],
        ),
        space(
            "Cabana ou Salão de Jogos",
            "Espaço amplo e versátil para eventos médios e recreação.",
            350,
            SpaceType::Social,
            1081,
            &["Jogos", "Área Coberta"],
            ALL_WEEK,
            &[],
        ),
        space(
            "Quadra (sem uso do Clube)",
            "Espaço esportivo amplo para eventos ou competições.",
            2000,
            SpaceType::Sports,
            1059,
            &["Iluminação", "Arquibancada"],
            ALL_WEEK,
            &[],
        ),
        space(
            "Clube (sem exclusividade)",
            "Acesso às áreas comuns do clube para eventos compartilhados.",
            500,
            SpaceType::Outdoor,
            10,
            &["Piscinas", "Área Verde"],
            ALL_WEEK,
            &[],
        ),
        space(
            "Clube (com exclusividade)",
            "Locação total do clube para grandes eventos privados.",
            3000,
            SpaceType::Corporate,
            16,
            &["Exclusividade Total", "Todas as áreas"],
            "Feriado ou Dia Útil (08h às 17h)",
            &[],
        ),
        space(
            "Cerimonial (Associado ou Não)",
            "Salão nobre climatizado para casamentos e festas de gala.",
            800,
            SpaceType::Social,
            203,
            &["Ar Condicionado", "Palco", "Cozinha"],
            "Horário Noturno (22h às 03h)",
            &["Mesas", "Cadeiras"],
        ),
        space(
            "Sala de Reunião",
            "Ambiente corporativo para reuniões, treinamentos e workshops.",
            70,
            SpaceType::Corporate,
            1,
            &["Projetor", "Wifi", "Climatizado"],
            ALL_WEEK,
            &["Mesa de Reunião"],
        ),
        space(
            "Bar (Associados/Alto Valor)",
            "Área descontraída próxima às piscinas.",
            180,
            SpaceType::Social,
            437,
            &["Balcão", "Freezer"],
            "Feriado/Dia Útil (11h às 16h) ou Noturno (19h às 00h)",
            &[],
        ),
        space(
            "Cachoeiro - Salão",
            "Salão de festas na unidade de Cachoeiro.",
            250,
            SpaceType::Social,
            180,
            &["Cozinha de apoio"],
            CACHOEIRO_WEEK,
            &[],
        ),
        space(
            "Cachoeiro - Churrasqueiras",
            "Área de churrasco na unidade de Cachoeiro.",
            60,
            SpaceType::Intimate,
            292,
            &["Área Verde"],
            CACHOEIRO_WEEK,
            &[],
        ),
    ]
}
