use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::constants::LEVELS_DIR;
use crate::filemanager::FileManager;
use crate::geometry::{vec2, Rect, Vec2};
use crate::properties::{PropertiesXml, PropertyMap};
use crate::racetimer::{Checkpoint, MarkerKind, RaceMarker};

#[derive(Debug, Deserialize)]
struct ObjectXml {
    #[serde(rename = "@id")]
    id: i32,
    #[serde(rename = "@type")]
    typ: Option<String>,
    #[serde(rename = "@class")]
    class: Option<String>,
    #[serde(rename = "@x")]
    x: f32,
    #[serde(rename = "@y")]
    y: f32,
    #[serde(rename = "@width")]
    width: Option<f32>,
    #[serde(rename = "@height")]
    height: Option<f32>,
    #[serde(rename = "@gid")]
    gid: Option<u32>,

    properties: Option<PropertiesXml>,
}

#[derive(Debug, Deserialize)]
struct ObjectGroupXml {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(default)]
    object: Vec<ObjectXml>,
}

// Tile data and tilesets belong to the renderer; only the objects matter here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TileMapXmlField {
    EditorSettings(IgnoredAny),
    TileSet(IgnoredAny),
    Properties(IgnoredAny),
    ObjectGroup(ObjectGroupXml),
    Layer(IgnoredAny),
    ImageLayer(IgnoredAny),
    Group(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct TileMapXml {
    #[serde(rename = "@height")]
    height: i32,
    #[serde(rename = "@tileheight")]
    tileheight: i32,

    #[serde(rename = "$value", default)]
    fields: Vec<TileMapXmlField>,
}

pub fn level_path(level: &str) -> PathBuf {
    PathBuf::from(LEVELS_DIR).join(format!("{}.tmx", level))
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelEnd {
    pub bounds: Rect,
    pub send_to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDisplay {
    pub bounds: Rect,
    pub text: String,
    pub color: [u8; 4],
    pub font_size: i32,
    pub draw_screen: bool,
}

// Where a timer display sits and which race it reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMarker {
    pub bounds: Rect,
    pub race_id: i32,
}

/*
 * Everything gameplay needs from a level file.
 *
 * Positions are converted from Tiled's y-down pixel space into world space,
 * where y points up and the bottom of the map is 0.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelData {
    pub player_spawn: Option<Vec2>,
    pub checkpoints: Vec<Checkpoint>,
    pub race_markers: Vec<RaceMarker>,
    pub timer_displays: Vec<DisplayMarker>,
    pub level_ends: Vec<LevelEnd>,
    pub text_displays: Vec<TextDisplay>,
}

const WHITE: [u8; 4] = [255, 255, 255, 255];

// Accepts "r.g.b", "r.g.b.a" and Tiled's "#aarrggbb" / "#rrggbb".
fn parse_color(s: &str) -> Result<[u8; 4]> {
    if let Some(hex) = s.strip_prefix('#') {
        let n = u32::from_str_radix(hex, 16).map_err(|e| anyhow!("invalid color {:?}: {}", s, e))?;
        let [a, r, g, b] = n.to_be_bytes();
        return match hex.len() {
            6 => Ok([r, g, b, 255]),
            8 => Ok([r, g, b, a]),
            _ => bail!("invalid color {:?}", s),
        };
    }
    let parts = s
        .split('.')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| anyhow!("invalid color {:?}: {}", s, e))?;
    match parts.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, 255]),
        [r, g, b, a] => Ok([*r, *g, *b, *a]),
        _ => bail!("invalid color {:?}", s),
    }
}

fn object_kind(group: Option<&str>, xml: &ObjectXml, properties: &PropertyMap) -> Result<Option<String>> {
    if let Some(kind) = properties.get_string("type")? {
        return Ok(Some(kind.to_owned()));
    }
    if let Some(kind) = xml.typ.as_ref().or(xml.class.as_ref()) {
        return Ok(Some(kind.clone()));
    }
    Ok(match group {
        Some("checkpoints") => Some("checkpoint".to_owned()),
        Some("displays") => Some("timer_display".to_owned()),
        _ => None,
    })
}

impl LevelData {
    pub fn from_file(path: &Path, files: &FileManager) -> Result<LevelData> {
        info!("loading level from {:?}", path);
        let text = files
            .read_to_string(path)
            .map_err(|e| anyhow!("unable to open {:?}: {}", path, e))?;
        Self::parse(&text).context(format!("unable to load {:?}", path))
    }

    pub fn parse(text: &str) -> Result<LevelData> {
        let xml = quick_xml::de::from_str::<TileMapXml>(text)?;
        let map_height = (xml.height * xml.tileheight) as f32;
        let mut data = LevelData::default();

        for field in xml.fields {
            let TileMapXmlField::ObjectGroup(group) = field else {
                continue;
            };
            for object in group.object {
                data.add_object(group.name.as_deref(), object, map_height)?;
            }
        }

        debug!(
            "level has {} checkpoints, {} race markers, {} timer displays, {} level ends",
            data.checkpoints.len(),
            data.race_markers.len(),
            data.timer_displays.len(),
            data.level_ends.len()
        );
        Ok(data)
    }

    fn add_object(&mut self, group: Option<&str>, mut xml: ObjectXml, map_height: f32) -> Result<()> {
        let id = xml.id;
        let w = xml.width.unwrap_or(0.0);
        let h = xml.height.unwrap_or(0.0);
        // Tile objects are anchored at their bottom-left, everything else at the top-left.
        let bottom = if xml.gid.is_some() {
            map_height - xml.y
        } else {
            map_height - (xml.y + h)
        };
        let bounds = Rect {
            x: xml.x,
            y: bottom,
            w,
            h,
        };

        let properties: PropertyMap = xml
            .properties
            .take()
            .map(|x| x.try_into())
            .transpose()?
            .unwrap_or_default();
        let Some(kind) = object_kind(group, &xml, &properties)? else {
            warn!("skipping object {} with no type", id);
            return Ok(());
        };

        let race_id = || -> Result<i32> {
            properties
                .get_int("race_id")?
                .ok_or_else(|| anyhow!("object {} ({}) has no race_id", id, kind))
        };

        match kind.as_str() {
            "player_spawn" => {
                self.player_spawn = Some(vec2(bounds.center().x, bounds.bottom()));
            }
            "checkpoint" => self.checkpoints.push(Checkpoint::new(bounds)),
            "timer_display" => self.timer_displays.push(DisplayMarker {
                bounds,
                race_id: race_id()?,
            }),
            "level_end" => {
                let send_to = properties
                    .get_string("send_to")?
                    .ok_or_else(|| anyhow!("level end {} has no send_to", id))?;
                self.level_ends.push(LevelEnd {
                    bounds,
                    send_to: send_to.to_owned(),
                });
            }
            "text_display" => {
                let color = match properties.get_string("color")? {
                    Some(color) => parse_color(color).unwrap_or_else(|e| {
                        warn!("text display {}: {}", id, e);
                        WHITE
                    }),
                    None => WHITE,
                };
                self.text_displays.push(TextDisplay {
                    bounds,
                    text: properties.get_string("text")?.unwrap_or("").to_owned(),
                    color,
                    font_size: properties.get_int("font_size")?.unwrap_or(20),
                    draw_screen: properties.get_bool("draw_screen")?.unwrap_or(true),
                });
            }
            other => {
                let marker_kind = MarkerKind::from_type(other);
                let in_ends_group = group == Some("ends");
                if marker_kind == MarkerKind::Unknown && !in_ends_group {
                    warn!("skipping object {} with unknown type {:?}", id, other);
                    return Ok(());
                }
                self.race_markers.push(RaceMarker {
                    bounds,
                    kind: marker_kind,
                    race_id: race_id()?,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" width="20" height="10" tilewidth="64" tileheight="64">
 <tileset firstgid="1" source="tileset.tsx"/>
 <layer id="1" name="walls" width="20" height="10">
  <data encoding="csv">0,0,0</data>
 </layer>
 <objectgroup id="2" name="special">
  <object id="1" x="64" y="512" width="64" height="64">
   <properties>
    <property name="type" value="player_spawn"/>
   </properties>
  </object>
  <object id="2" x="1200" y="0" width="64" height="128">
   <properties>
    <property name="send_to" value="menu"/>
    <property name="type" value="level_end"/>
   </properties>
  </object>
  <object id="3" x="128" y="64" width="256" height="128">
   <properties>
    <property name="color" value="255.200.0"/>
    <property name="draw_screen" type="bool" value="false"/>
    <property name="font_size" type="int" value="16"/>
    <property name="text" value="Hold R to teleport"/>
    <property name="type" value="text_display"/>
   </properties>
  </object>
 </objectgroup>
 <objectgroup id="3" name="checkpoints">
  <object id="4" gid="12" x="640" y="576" width="64" height="64"/>
 </objectgroup>
 <objectgroup id="4" name="ends">
  <object id="5" gid="40" x="256" y="576" width="64" height="64">
   <properties>
    <property name="race_id" type="int" value="0"/>
    <property name="type" value="start"/>
   </properties>
  </object>
  <object id="6" gid="40" x="1024" y="576" width="64" height="64">
   <properties>
    <property name="race_id" type="int" value="0"/>
    <property name="type" value="end"/>
   </properties>
  </object>
 </objectgroup>
 <objectgroup id="5" name="displays">
  <object id="7" x="320" y="320" width="192" height="64">
   <properties>
    <property name="race_id" type="int" value="0"/>
   </properties>
  </object>
 </objectgroup>
</map>
"#;

    #[test]
    fn loads_objects() {
        let data = LevelData::parse(LEVEL).unwrap();

        // The map is 640 pixels tall.
        assert_eq!(data.player_spawn, Some(vec2(96.0, 64.0)));

        assert_eq!(data.checkpoints.len(), 1);
        assert_eq!(
            data.checkpoints[0].bounds,
            Rect {
                x: 640.0,
                y: 64.0,
                w: 64.0,
                h: 64.0
            }
        );
        assert!(!data.checkpoints[0].active);
        assert!(!data.checkpoints[0].resets_timer);

        let kinds: Vec<(MarkerKind, i32)> =
            data.race_markers.iter().map(|m| (m.kind, m.race_id)).collect();
        assert_eq!(kinds, vec![(MarkerKind::Start, 0), (MarkerKind::End, 0)]);
        assert_eq!(data.race_markers[1].position(), vec2(1056.0, 96.0));

        assert_eq!(data.timer_displays.len(), 1);
        assert_eq!(data.timer_displays[0].race_id, 0);
        assert_eq!(data.timer_displays[0].bounds.y, 256.0);

        assert_eq!(data.level_ends.len(), 1);
        assert_eq!(data.level_ends[0].send_to, "menu");
        assert_eq!(data.level_ends[0].bounds.y, 512.0);

        assert_eq!(data.text_displays.len(), 1);
        let text = &data.text_displays[0];
        assert_eq!(text.text, "Hold R to teleport");
        assert_eq!(text.color, [255, 200, 0, 255]);
        assert_eq!(text.font_size, 16);
        assert!(!text.draw_screen);
    }

    #[test]
    fn race_marker_needs_race_id() {
        let level = r#"<map width="1" height="1" tilewidth="64" tileheight="64">
 <objectgroup name="special">
  <object id="1" x="0" y="0" width="64" height="64">
   <properties><property name="type" value="race_start"/></properties>
  </object>
 </objectgroup>
</map>"#;
        assert!(LevelData::parse(level).is_err());
    }

    #[test]
    fn untyped_objects_are_skipped() {
        let level = r#"<map width="1" height="1" tilewidth="64" tileheight="64">
 <objectgroup name="special">
  <object id="1" x="0" y="0" width="64" height="64"/>
  <object id="2" x="0" y="0" width="64" height="64">
   <properties><property name="type" value="decoration"/></properties>
  </object>
 </objectgroup>
</map>"#;
        assert_eq!(LevelData::parse(level).unwrap(), LevelData::default());
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("1.2.3").unwrap(), [1, 2, 3, 255]);
        assert_eq!(parse_color("1.2.3.4").unwrap(), [1, 2, 3, 4]);
        assert_eq!(parse_color("#80ff0000").unwrap(), [255, 0, 0, 128]);
        assert_eq!(parse_color("#00ff00").unwrap(), [0, 255, 0, 255]);
        assert!(parse_color("red").is_err());
        assert!(parse_color("1.2").is_err());
    }

    #[test]
    fn from_file() {
        let files = FileManager::in_memory();
        files.write(&level_path("race"), LEVEL).unwrap();
        let data = LevelData::from_file(&level_path("race"), &files).unwrap();
        assert_eq!(data.race_markers.len(), 2);
        assert!(LevelData::from_file(&level_path("missing"), &files).is_err());
    }
}
