//! The compiled-in prisoner-of-war column mapping.

use chrono::NaiveDate;

use pow_model::attr;
use pow_model::vocab::{SCHEMA_POW, SCHEMA_WARSA};
use pow_transform::{Converter, Separator};
use pow_validate::Validator;

use crate::error::Result;
use crate::table::{ColumnMapping, MappingTable, ResourceSpec};

/// Header of the free-text name column.
pub const NAME_COLUMN: &str = "sukunimi ja etunimet";
/// Header of the per-record serial number column.
pub const ID_COLUMN: &str = "nro";

const NARC_SOURCES: &str = "Mikäli lähdettä ei ole mainittu, ovat käytetyt lähteet tiedosta \
yksimielisiä tai lähde on Kansallisarkisto: Suomen sodissa 1939–1945 menehtyneiden tietokanta";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn slash(column: &str, attribute: pow_model::Iri) -> ColumnMapping {
    ColumnMapping::new(column, attribute).separator(Separator::Slash)
}

fn semicolon(column: &str, attribute: pow_model::Iri) -> ColumnMapping {
    ColumnMapping::new(column, attribute).separator(Separator::Semicolon)
}

fn date_column(column: &str, attribute: pow_model::Iri, validator: Validator) -> ColumnMapping {
    slash(column, attribute)
        .converter(Converter::Date)
        .validator(validator)
}

/// Mapping entries for the prisoner-of-war spreadsheet, in column order.
pub fn prisoner_columns() -> Vec<ColumnMapping> {
    let propaganda_link = |column: &str| {
        semicolon(column, SCHEMA_POW.iri("propaganda_magazine_link"))
            .converter(Converter::Iri)
            .labels("Linkki propagandalehteen", "Propaganda magazine link")
    };

    vec![
        date_column(
            "syntymäaika",
            attr::date_of_birth(),
            Validator::dates(ymd(1860, 1, 1), ymd(1935, 1, 1)),
        )
        .labels("Syntymäpäivä", "Date of birth")
        .description("Henkilön syntymäpäivä"),
        slash("synnyinkunta", attr::municipality_of_birth_literal())
            .labels("Syntymäkunta", "Municipality of birth")
            .description("Henkilön syntymäkunta"),
        slash("kotikunta", attr::municipality_of_domicile_literal())
            .labels("Kotikunta", "Municipality of domicile")
            .description("Kunta, jossa henkilö on ollut kirjoilla vangitsemishetkellä"),
        slash("asuinkunta", attr::municipality_of_residence_literal())
            .labels("Asuinkunta", "Municipality of residence")
            .description(&format!(
                "Kunta, jossa henkilö on tosiasiassa asunut sotaan lähtiessä. {NARC_SOURCES}"
            )),
        ColumnMapping::new("kuolinkunta, palanneet", attr::municipality_of_death_literal())
            .labels("Kuolinkunta", "Municipality of death"),
        slash("ammatti", attr::occupation_literal())
            .labels("Ammatti", "Occupation")
            .description(&format!(
                "Ammatti, jota henkilö on harjoittanut ennen vangitsemista. {NARC_SOURCES}"
            )),
        slash("siviilisääty", SCHEMA_POW.iri("marital_status"))
            .converter(Converter::MaritalStatus)
            .validator(Validator::MaritalStatus)
            .labels("Siviilisääty", "Marital status")
            .description(&format!(
                "Henkilön tiedossa oleva siviilisääty vangitsemishetkellä. {NARC_SOURCES}"
            )),
        slash("lapset", SCHEMA_POW.iri("number_of_children"))
            .converter(Converter::StripDash)
            .labels("Lasten lukumäärä", "Number of children")
            .description(&format!(
                "Henkilön lasten tiedossa oleva lukumäärä vangitsemishetkellä. {NARC_SOURCES}"
            )),
        slash("sotilasarvo", attr::rank_literal())
            .labels("Sotilasarvo", "Military rank")
            .description(&format!(
                "Henkilön sotilasarvo vangitsemishetkellä. {NARC_SOURCES}"
            )),
        ColumnMapping::new("joukko-osasto", attr::unit_literal())
            .labels("Joukko-osasto", "Military unit")
            .description("Henkilön tiedossa oleva joukko-osasto vangitsemishetkellä"),
        date_column("katoamisaika", attr::date_of_going_mia(), Validator::default_dates())
            .labels("Katoamispäivä", "Date of going missing in action")
            .description(
                "Päivä, jona henkilö on suomalaisten lähteiden mukaan kadonnut. \
                 Päivämäärät ilmoitetaan muodossa pp.kk.vvvv",
            ),
        slash("katoamispaikka", attr::place_of_going_mia_literal())
            .labels("Katoamispaikka", "Place of going missing in action")
            .description("Paikka, jossa henkilö on suomalaisten lähteiden mukaan kadonnut"),
        date_column("vangiksi aika", attr::date_of_capture(), Validator::default_dates())
            .labels("Vangiksi jäämisen päivämäärä", "Date of capture")
            .description(
                "Päivä, jona henkilö on jäänyt vangiksi. Päivämäärät ilmoitetaan muodossa pp.kk.vvvv",
            ),
        slash("vangiksi paikka, kunta", attr::municipality_of_capture_literal())
            .labels("Vangiksi jäämisen kunta", "Municipality of capture")
            .description("Kunta, jonka alueella henkilö on jäänyt sotavangiksi"),
        slash(
            "vangiksi paikka, kylä, kaupunginosa",
            SCHEMA_POW.iri("place_of_capture_literal"),
        )
        .labels(
            "Vangiksi jäämisen kylä tai kaupunginosa",
            "Village or district of capture",
        )
        .description("Kylä tai kaupunginosa, jossa henkilö on jäänyt sotavangiksi"),
        slash(
            "vangiksi taistelupaikka",
            SCHEMA_POW.iri("place_of_capture_battle_literal"),
        )
        .labels(
            "Vangiksi jäämisen taistelupaikka",
            "Location of battle in which captured",
        ),
        semicolon(
            "vangiksi jääminen, oma tai muiden selostus kuulusteluissa, arkistotietoja",
            SCHEMA_POW.iri("description_of_capture"),
        )
        .labels("Selvitys vangiksi jäämisestä", "Description of capture")
        .description(
            "Tieto siitä, miten henkilö on jäänyt vangiksi joko hänen oman kertomansa tai muun lähteen mukaan",
        ),
        date_column(
            "palannut",
            attr::date_of_return(),
            Validator::dates(ymd(1939, 11, 30), ymd(1980, 1, 1)),
        )
        .labels(
            "Sotavankeudesta palaamisen päivämäärä",
            "Date of return from captivity",
        )
        .description("Päivä, jona henkilö on palannut Suomeen sotavankeudesta"),
        date_column("kuollut", attr::date_of_death(), Validator::default_dates())
            .labels("Kuolinpäivä", "Date of death")
            .description(&format!("Henkilön tiedossa oleva kuolinpäivä. {NARC_SOURCES}")),
        slash("kuolinsyy", attr::cause_of_death()).labels("Kuolinsyy", "Cause of death"),
        slash("kuolinpaikka", SCHEMA_POW.iri("place_of_death"))
            .labels("Kuolinpaikka", "Place of death")
            .description("Sotavankeuden jälkeen kuolleen henkilön kuolinpaikka"),
        semicolon(
            "hautauspaikka ja -aika",
            SCHEMA_POW.iri("place_of_burial_literal"),
        )
        .labels("Hautauspaikka", "Place of burial"),
        semicolon("vankeuspaikat", attr::captivity())
            .resource(
                ResourceSpec::new(attr::captivity_class(), attr::location_literal())
                    .with_order_number()
                    .with_dates()
                    .with_labels(
                        "Henkilön {person} sotavankeus",
                        "Person's {person} captivity",
                    ),
            )
            .labels("Vankeuspaikat", "Captivity locations")
            .description(
                "Ne kuulustelupaikat, vankileirit, vankilat ja sairaalat, joissa vanki on eri \
                 lähteistä saatujen tietojen mukaan ollut sotavankeusaikanaan sekä kussakin \
                 paikassa oleskelun päivämäärät",
            ),
        semicolon("muita tietoja", attr::additional_information())
            .labels("Muita vankeustietoja", "Additional information")
            .description("Muita sotavankeuteen liittyviä tietoja"),
        date_column(
            "palanneiden kuolinaika",
            attr::date_of_death(),
            Validator::default_dates(),
        ),
        ColumnMapping::new(
            "kuolleeksi julistaminen",
            attr::date_of_declaration_of_death(),
        )
        .converter(Converter::Date)
        .validator(Validator::default_dates())
        .labels(
            "Kuolleeksi julistamisen päivämäärä",
            "Date of declaration of death",
        ),
        semicolon(
            "valokuva KA:n henkilöakteissa, RGVA:n henkilömapeissa, muissa venäläisissä arkistoissa ja suomalaisissa julkaisuissa",
            attr::photograph(),
        )
        .labels("Valokuva", "Photograph"),
        semicolon(
            "valokuva Sotilaan Äänessä",
            SCHEMA_POW.iri("photograph_sotilaan_aani"),
        )
        .labels(
            "Valokuva Sotilaan Ääni -lehdessä",
            "Photograph in Sotilaan Ääni magazine",
        ),
        semicolon(
            "suomalainen paluukuulustelupöytäkirja",
            attr::finnish_return_interrogation_file(),
        )
        .labels(
            "Suomalainen paluukuulustelupöytäkirja",
            "Finnish return interrogation file",
        ),
        semicolon(
            "radiossa, PM:n valvontatoimiston radiokatsaukset",
            attr::radio_report(),
        )
        .labels("PM:n valvontatoimiston radiokatsaukset", "Radio reports")
        .description(
            "Neuvostoliitto lähetti suomenkielisiä propagandalähetyksiä sekä talvi- että \
             jatkosodan aikana. Päämajan valvontatoimisto laati lähetyksistä sotavankinimien luetteloja",
        ),
        ColumnMapping::new(
            "vankeudessa takavarikoitu omaisuus markoissa",
            SCHEMA_POW.iri("confiscated_possession"),
        )
        .labels(
            "Vankeudessa takavarikoitu omaisuus markoissa",
            "Confiscated possessions",
        ),
        ColumnMapping::new("suomenruotsalainen", attr::mother_tongue())
            .converter(Converter::MotherTongue)
            .validator(Validator::MotherTongue)
            .labels("Äidinkieli", "Mother tongue"),
        semicolon(
            "Karagandan kortisto",
            SCHEMA_POW.iri("karaganda_card_file"),
        )
        .labels("Karagandan kortisto", "Karaganda card file"),
        semicolon(
            "Neuvostoliittolaiset sotavankikortistot ja henkilömappikokoelmat",
            SCHEMA_POW.iri("soviet_card_files"),
        )
        .labels(
            "Neuvostoliittolaiset sotavankikortistot ja henkilömappikokoelmat",
            "Soviet prisoner of war card files and person registers",
        ),
        semicolon(
            "Talvisodan kokoelma",
            SCHEMA_POW.iri("winter_war_collection"),
        )
        .labels("Talvisodan kokoelma", "Winter War collection")
        .description("Venäjän valtion sota-arkisto RGVA, Fondi 34980 Talvisodan kokoelma"),
        semicolon("lentolehtinen", SCHEMA_POW.iri("flyer"))
            .labels("Lentolehtinen", "Flyer")
            .description("Neuvostoliittolaiset propagandalentolehtiset, joissa henkilö on mainittu"),
        semicolon(
            "Sotilaan Ääni-lehti, digitoitu ja indeksoitu",
            SCHEMA_POW.iri("sotilaan_aani"),
        )
        .labels("Sotilaan Ääni", "Sotilaan Ääni magazine"),
        semicolon(
            "Kansan Valta, Kansan Mies, Kansan Ääni, Suomen Kansan Ääni, Kansan Sana",
            SCHEMA_POW.iri("propaganda_magazine"),
        )
        .labels("Propagandalehti", "Propaganda magazine")
        .description(
            "Neuvostoliittolaiset suomen- ja venäjänkieliset propagandalehdet, joissa henkilö on mainittu",
        ),
        propaganda_link("Kansan Valta, Kansan Mies, Kansan Ääni, Suomen Kansan Ääni. Linkit"),
        propaganda_link(
            "Kansan Valta, Kansan Mies, Kansan Ääni, Suomen Kansan Ääni. Toiset linkit",
        ),
        propaganda_link(
            "Kansan Valta, Kansan Mies, Kansan Ääni, Suomen Kansan Ääni. Kolmannet linkit",
        ),
        propaganda_link(
            "Kansan Valta, Kansan Mies, Kansan Ääni, Suomen Kansan Ääni. Neljännet linkit",
        ),
        semicolon(
            "muistelmat, lehtijutut, tietokirjat, tutkimukset, Kansa taisteli-lehti, näyttelyt",
            SCHEMA_POW.iri("memoir"),
        )
        .labels("Muistelmat, lehtiartikkelit ja kirjallisuus", "Memoirs")
        .description("Kirjallisissa lähteissä olevat maininnat henkilön sotavankeudesta"),
        ColumnMapping::new("TV-ja radio-ohjelmat, tallenne video/audio", attr::recording())
            .labels("Tallenne (video/audio)", "Recording (video/audio)"),
        ColumnMapping::new(
            "Karjalan tasavallan kansallisarkiston dokumentit",
            SCHEMA_POW.iri("karelian_archive_documents"),
        )
        .labels(
            "Karjalan kansallisarkiston dokumentit",
            "Karelian archive documents",
        ),
    ]
}

/// The default table.
pub fn prisoner_mapping() -> Result<MappingTable> {
    MappingTable::new(prisoner_columns())
}

/// Display name attributes written from the name column, with schema labels.
pub fn name_attributes() -> Vec<ColumnMapping> {
    vec![
        ColumnMapping::new(NAME_COLUMN, attr::given_names()).labels("Etunimet", "Given names"),
        ColumnMapping::new(NAME_COLUMN, attr::family_name()).labels("Sukunimi", "Family name"),
        ColumnMapping::new(NAME_COLUMN, attr::original_name())
            .labels("Alkuperäinen nimi", "Original name")
            .description("Nimi alkuperäisessä muodossaan"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = prisoner_mapping().unwrap();
        assert!(table.len() > 40);
        let captivity = &table.entries()[table.resolve("vankeuspaikat").unwrap()];
        let resource = captivity.resource.as_ref().unwrap();
        assert!(resource.order_number && resource.dates);
        assert_eq!(captivity.separator, Separator::Semicolon);
    }

    #[test]
    fn date_of_death_has_two_source_columns() {
        let table = prisoner_mapping().unwrap();
        let count = table
            .entries()
            .iter()
            .filter(|e| e.attribute == attr::date_of_death())
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn name_attributes_share_the_name_column() {
        assert!(name_attributes().iter().all(|e| e.column == NAME_COLUMN));
    }

    #[test]
    fn schema_warsa_namespace_for_shared_attributes() {
        assert!(SCHEMA_WARSA.contains(&attr::date_of_birth()));
        assert!(SCHEMA_POW.contains(&attr::captivity()));
    }
}
