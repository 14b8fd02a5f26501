//! Text metadata for the Middle English parsed corpus
//!
//! Static tables keyed by file stem (`cmkentho.m1`): manuscript date, genre
//! and dialect. Files not listed here report empty metadata.

use regex::Regex;
use std::sync::LazyLock;

static PERIOD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?\.([em]\d\d?)\.psd").expect("valid period code regex"));

/// Metadata for one corpus text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInfo {
    pub file: &'static str,
    pub year: u16,
    pub genre: &'static str,
    pub dialect: &'static str,
}

const fn text(file: &'static str, year: u16, genre: &'static str, dialect: &'static str) -> TextInfo {
    TextInfo {
        file,
        year,
        genre,
        dialect,
    }
}

const HOMILY: &str = "Homily";
const HISTORY: &str = "History";
const TREATISE: &str = "Religious Treatise";
const SAINT: &str = "Biography, Life of Saint";
const BIBLE: &str = "Bible";
const RULE: &str = "Rule";
const HANDBOOK: &str = "Handbook";
const SERMON: &str = "Sermon";
const FICTION: &str = "Fiction";
const ROMANCE: &str = "Romance";

const KENTISH: &str = "Kentish";
const EAST_MIDLANDS: &str = "East Midlands";
const WEST_MIDLANDS: &str = "West Midlands";
const NORTHERN: &str = "Northern";
const SOUTHERN: &str = "Southern";

pub static TEXTS: &[TextInfo] = &[
    // M1
    text("cmkentho.m1", 1125, HOMILY, KENTISH),
    text("cmpeterb.m1", 1150, HISTORY, EAST_MIDLANDS),
    text("cmorm.po.m1", 1200, HOMILY, EAST_MIDLANDS),
    text("cmvices1.m1", 1225, TREATISE, EAST_MIDLANDS),
    text("cmtrinit.mx1", 1225, HOMILY, EAST_MIDLANDS),
    text("cmlambx1.mx1", 1225, HOMILY, WEST_MIDLANDS),
    text("cmlamb1.m1", 1225, HOMILY, WEST_MIDLANDS),
    text("cmsawles.m1", 1225, HOMILY, WEST_MIDLANDS),
    text("cmhali.m1", 1225, TREATISE, WEST_MIDLANDS),
    text("cmkathe.m1", 1225, SAINT, WEST_MIDLANDS),
    text("cmjulia.m1", 1225, SAINT, WEST_MIDLANDS),
    text("cmmarga.m1", 1225, SAINT, WEST_MIDLANDS),
    text("cmancriw-1.m1", 1230, TREATISE, WEST_MIDLANDS),
    text("cmancriw-2.m1", 1230, TREATISE, WEST_MIDLANDS),
    // M2
    text("cmkentse.m2", 1275, HOMILY, KENTISH),
    text("cmayenbi.m2", 1340, TREATISE, KENTISH),
    text("cmearlps.m2", 1350, BIBLE, EAST_MIDLANDS),
    text("cmaelr3.m23", 1400, RULE, WEST_MIDLANDS),
    text("cmrolltr.m24", 1440, TREATISE, NORTHERN),
    text("cmrollep.m24", 1450, TREATISE, NORTHERN),
    // M3
    text("cmpolych.m3", 1387, HISTORY, SOUTHERN),
    text("cmntest.m3", 1388, BIBLE, SOUTHERN),
    text("cmpurvey.m3", 1388, TREATISE, SOUTHERN),
    text("cmhorses.m3", 1450, HANDBOOK, SOUTHERN),
    text("cmroyal.m34", 1450, SERMON, SOUTHERN),
    text("cmctpars.m3", 1390, TREATISE, EAST_MIDLANDS),
    text("cmctmeli.m3", 1390, FICTION, EAST_MIDLANDS),
    text("cmequato.m3", 1392, HANDBOOK, EAST_MIDLANDS),
    text("cmwycser.m3", 1400, SERMON, EAST_MIDLANDS),
    text("cmboeth.m3", 1425, "Philosophy", EAST_MIDLANDS),
    text("cmotest.m3", 1425, BIBLE, EAST_MIDLANDS),
    text("cmcloud.m3", 1425, TREATISE, EAST_MIDLANDS),
    text("cmmandev.m3", 1425, "Travelogue", EAST_MIDLANDS),
    text("cmastro.m3", 1450, HANDBOOK, EAST_MIDLANDS),
    text("cmhilton.m34", 1450, TREATISE, EAST_MIDLANDS),
    text("cmvices4.m34", 1450, TREATISE, EAST_MIDLANDS),
    text("cmjulnor.m34", 1450, TREATISE, EAST_MIDLANDS),
    text("cmedvern.m3", 1390, TREATISE, WEST_MIDLANDS),
    text("cmbrut3.m3", 1400, HISTORY, WEST_MIDLANDS),
    text("cmmirk.m34", 1500, SERMON, WEST_MIDLANDS),
    text("cmbenrul.m3", 1425, RULE, NORTHERN),
    text("cmedthor.m34", 1440, TREATISE, NORTHERN),
    text("cmgaytry.m34", 1440, SERMON, NORTHERN),
    // M4
    text("cmgregor.m4", 1475, HISTORY, SOUTHERN),
    text("cmaelr4.m4", 1450, RULE, EAST_MIDLANDS),
    text("cmedmund.m4", 1450, SAINT, EAST_MIDLANDS),
    text("cmkempe.m4", 1450, TREATISE, EAST_MIDLANDS),
    text("cmcapser.m4", 1452, SERMON, EAST_MIDLANDS),
    text("cmcapchr.m4", 1464, HISTORY, EAST_MIDLANDS),
    text("cmreynes.m4", 1485, HANDBOOK, EAST_MIDLANDS),
    text("cmreynar.m4", 1481, FICTION, EAST_MIDLANDS),
    text("cmfitzja.m4", 1495, SERMON, EAST_MIDLANDS),
    text("cminnoce.m4", 1497, SERMON, EAST_MIDLANDS),
    text("cmmalory.m4", 1470, ROMANCE, WEST_MIDLANDS),
    text("cmsiege.m4", 1500, ROMANCE, WEST_MIDLANDS),
    text("cmthorn.mx4", 1440, HANDBOOK, NORTHERN),
];

/// Metadata for a file stem, if the text is known
pub fn lookup(file: &str) -> Option<&'static TextInfo> {
    TEXTS.iter().find(|t| t.file == file)
}

/// Period code from a corpus filename, e.g. `m34` from `cmroyal.m34.psd`
pub fn period_code(file_name: &str) -> Option<&str> {
    PERIOD_CODE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
