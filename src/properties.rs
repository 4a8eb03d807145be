use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;

fn default_type() -> String {
    "string".to_owned()
}

#[derive(Debug, Deserialize)]
struct PropertyXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type", default = "default_type")]
    typ: String,
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesXml {
    #[serde(default)]
    property: Vec<PropertyXml>,
}

#[derive(Debug, Clone, PartialEq)]
enum PropertyValue {
    Int(i32),
    Float(f64),
    String(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap(HashMap<String, PropertyValue>);

impl PropertyMap {
    pub fn new() -> Self {
        PropertyMap(HashMap::new())
    }

    pub fn contains(&self, k: &str) -> bool {
        self.0.contains_key(k)
    }

    pub fn get_int(&self, k: &str) -> Result<Option<i32>> {
        self.0
            .get(k)
            .map(|v| match v {
                PropertyValue::Int(n) => Ok(*n),
                _ => Err(anyhow!("property {k} is not an int")),
            })
            .transpose()
    }

    // Tiled writes whole numbers into float properties too, so ints are accepted.
    pub fn get_float(&self, k: &str) -> Result<Option<f64>> {
        self.0
            .get(k)
            .map(|v| match v {
                PropertyValue::Float(f) => Ok(*f),
                PropertyValue::Int(n) => Ok(*n as f64),
                _ => Err(anyhow!("property {k} is not a float")),
            })
            .transpose()
    }

    pub fn get_string(&self, k: &str) -> Result<Option<&str>> {
        self.0
            .get(k)
            .map(|v| match v {
                PropertyValue::String(s) => Ok(s.as_str()),
                _ => Err(anyhow!("property {k} is not a string")),
            })
            .transpose()
    }

    pub fn get_bool(&self, k: &str) -> Result<Option<bool>> {
        self.0
            .get(k)
            .map(|v| match v {
                PropertyValue::Bool(b) => Ok(*b),
                _ => Err(anyhow!("property {k} is not a bool")),
            })
            .transpose()
    }
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<PropertyXml> for PropertyValue {
    type Error = anyhow::Error;

    fn try_from(value: PropertyXml) -> Result<Self, Self::Error> {
        Ok(match value.typ.as_ref() {
            "int" => PropertyValue::Int(value.value.parse()?),
            "float" => PropertyValue::Float(value.value.parse()?),
            "string" | "color" | "file" => PropertyValue::String(value.value.to_owned()),
            "bool" => PropertyValue::Bool(value.value == "true"),
            _ => bail!("invalid property type: {:?}", &value),
        })
    }
}

impl TryFrom<PropertiesXml> for PropertyMap {
    type Error = anyhow::Error;

    fn try_from(value: PropertiesXml) -> Result<Self, Self::Error> {
        let mut map = HashMap::new();
        for prop in value.property {
            let key = prop.name.to_owned();
            let value = prop.try_into()?;
            map.insert(key, value);
        }
        Ok(PropertyMap(map))
    }
}
