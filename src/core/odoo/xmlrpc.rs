//! Minimal XML-RPC codec for the Odoo external API.
//!
//! Only the subset Odoo speaks is supported: `methodCall` encoding and
//! `methodResponse` decoding (params or fault). Values map to and from
//! `serde_json::Value` so tool code can build arguments with `json!`.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::error::OdooError;

/// A single XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Double(f64),
    DateTime(String),
    Base64(Vec<u8>),
    Struct(BTreeMap<String, Value>),
    Array(Vec<Value>),
    Nil,
}

/// A `<fault>` returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// `faultCode`, rendered as text (Odoo uses integers, older servers strings).
    pub code: String,
    /// `faultString`, usually the server-side traceback.
    pub message: String,
}

impl Fault {
    /// Odoo reports `AccessDenied` with fault code 3.
    pub fn is_access_denied(&self) -> bool {
        self.code == "3" || self.code == "AccessDenied"
    }
}

/// Decoded `methodResponse`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Value),
    Fault(Fault),
}

impl Value {
    /// Integer view, accepting whole doubles.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Double(d) if d.fract() == 0.0 => Some(*d as i64),
            _ => None,
        }
    }

    /// Python-style truthiness, used to interpret `authenticate` results.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(i) => *i != 0,
            Value::Bool(b) => *b,
            Value::String(s) | Value::DateTime(s) => !s.is_empty(),
            Value::Double(d) => *d != 0.0,
            Value::Base64(b) => !b.is_empty(),
            Value::Struct(m) => !m.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Nil => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Double(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Struct(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(i) => serde_json::Value::from(i),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::String(s) | Value::DateTime(s) => serde_json::Value::String(s),
            Value::Double(d) => serde_json::Number::from_f64(d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Base64(bytes) => serde_json::Value::String(STANDARD.encode(bytes)),
            Value::Struct(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Nil => serde_json::Value::Null,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

/* ------------------------------- ENCODE --------------------------------- */

/// Encode a `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> Result<String, OdooError> {
    let mut wr = Writer::new(Vec::new());

    wr.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml)?;
    start(&mut wr, "methodCall")?;
    text_element(&mut wr, "methodName", method)?;
    start(&mut wr, "params")?;
    for param in params {
        start(&mut wr, "param")?;
        write_value(&mut wr, param)?;
        end(&mut wr, "param")?;
    }
    end(&mut wr, "params")?;
    end(&mut wr, "methodCall")?;

    String::from_utf8(wr.into_inner()).map_err(xml)
}

fn write_value(wr: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), OdooError> {
    start(wr, "value")?;
    match value {
        Value::Int(i) if i32::try_from(*i).is_ok() => text_element(wr, "int", &i.to_string())?,
        Value::Int(i) => text_element(wr, "i8", &i.to_string())?,
        Value::Bool(b) => text_element(wr, "boolean", if *b { "1" } else { "0" })?,
        Value::String(s) => text_element(wr, "string", s)?,
        Value::Double(d) => text_element(wr, "double", &d.to_string())?,
        Value::DateTime(s) => text_element(wr, "dateTime.iso8601", s)?,
        Value::Base64(bytes) => text_element(wr, "base64", &STANDARD.encode(bytes))?,
        Value::Struct(members) => {
            start(wr, "struct")?;
            for (name, member) in members {
                start(wr, "member")?;
                text_element(wr, "name", name)?;
                write_value(wr, member)?;
                end(wr, "member")?;
            }
            end(wr, "struct")?;
        }
        Value::Array(items) => {
            start(wr, "array")?;
            start(wr, "data")?;
            for item in items {
                write_value(wr, item)?;
            }
            end(wr, "data")?;
            end(wr, "array")?;
        }
        Value::Nil => {
            wr.write_event(Event::Empty(BytesStart::new("nil")))
                .map_err(xml)?;
        }
    }
    end(wr, "value")
}

fn start(wr: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), OdooError> {
    wr.write_event(Event::Start(BytesStart::new(tag))).map_err(xml)
}

fn end(wr: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), OdooError> {
    wr.write_event(Event::End(BytesEnd::new(tag))).map_err(xml)
}

fn text_element(wr: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<(), OdooError> {
    start(wr, tag)?;
    wr.write_event(Event::Text(BytesText::new(text)))
        .map_err(xml)?;
    end(wr, tag)
}

fn xml<E: std::fmt::Display>(e: E) -> OdooError {
    OdooError::protocol(e.to_string())
}

/* ------------------------------- DECODE --------------------------------- */

/// Decode a `methodResponse` document.
pub fn decode_response(body: &str) -> Result<Response, OdooError> {
    let mut parser = Parser::new(body);

    parser.expect_start(b"methodResponse")?;
    let response = match parser.next_structural()? {
        Event::Start(e) if e.name().as_ref() == b"params" => {
            parser.expect_start(b"param")?;
            let value = parser.value_after_start_tag()?;
            parser.expect_end(b"param")?;
            parser.expect_end(b"params")?;
            Response::Success(value)
        }
        Event::Start(e) if e.name().as_ref() == b"fault" => {
            let value = parser.value_after_start_tag()?;
            parser.expect_end(b"fault")?;
            Response::Fault(fault_from_value(value)?)
        }
        other => {
            return Err(OdooError::protocol(format!(
                "expected <params> or <fault>, found {}",
                describe(&other)
            )));
        }
    };
    parser.expect_end(b"methodResponse")?;

    Ok(response)
}

fn fault_from_value(value: Value) -> Result<Fault, OdooError> {
    let Value::Struct(mut members) = value else {
        return Err(OdooError::protocol("fault value is not a struct"));
    };
    let code = match members.remove("faultCode") {
        Some(Value::Int(i)) => i.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => format!("{:?}", other),
        None => String::new(),
    };
    let message = match members.remove("faultString") {
        Some(Value::String(s)) => s,
        Some(other) => format!("{:?}", other),
        None => String::new(),
    };
    Ok(Fault { code, message })
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Parser<'a> {
    fn new(body: &'a str) -> Self {
        Self {
            reader: Reader::from_str(body),
        }
    }

    /// Next event, skipping declarations and comments but keeping text.
    fn next_raw(&mut self) -> Result<Event<'a>, OdooError> {
        loop {
            match self.reader.read_event().map_err(xml)? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => return Err(OdooError::protocol("unexpected end of document")),
                event => return Ok(event),
            }
        }
    }

    /// Next event that is not whitespace-only text.
    fn next_structural(&mut self) -> Result<Event<'a>, OdooError> {
        loop {
            match self.next_raw()? {
                Event::Text(t) if is_blank(&t) => {}
                event => return Ok(event),
            }
        }
    }

    fn expect_start(&mut self, tag: &[u8]) -> Result<(), OdooError> {
        match self.next_structural()? {
            Event::Start(e) if e.name().as_ref() == tag => Ok(()),
            other => Err(unexpected(tag, &other)),
        }
    }

    fn expect_end(&mut self, tag: &[u8]) -> Result<(), OdooError> {
        match self.next_structural()? {
            Event::End(e) if e.name().as_ref() == tag => Ok(()),
            other => Err(unexpected(tag, &other)),
        }
    }

    /// Parse `<value>…</value>`, consuming the opening tag first.
    fn value_after_start_tag(&mut self) -> Result<Value, OdooError> {
        match self.next_structural()? {
            Event::Start(e) if e.name().as_ref() == b"value" => self.value_body(),
            Event::Empty(e) if e.name().as_ref() == b"value" => Ok(Value::String(String::new())),
            other => Err(unexpected(b"value", &other)),
        }
    }

    /// Parse the inside of a `<value>` whose start tag was already read.
    fn value_body(&mut self) -> Result<Value, OdooError> {
        let mut untyped = String::new();
        loop {
            match self.next_raw()? {
                Event::Text(t) => untyped.push_str(&t.unescape().map_err(xml)?),
                Event::CData(c) => untyped.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::End(e) if e.name().as_ref() == b"value" => {
                    return Ok(Value::String(untyped));
                }
                Event::Start(e) => {
                    let tag = e.name().as_ref().to_vec();
                    let value = self.typed(&tag)?;
                    self.expect_end(b"value")?;
                    return Ok(value);
                }
                Event::Empty(e) => {
                    let value = empty_typed(e.name().as_ref())?;
                    self.expect_end(b"value")?;
                    return Ok(value);
                }
                other => return Err(unexpected(b"value content", &other)),
            }
        }
    }

    fn typed(&mut self, tag: &[u8]) -> Result<Value, OdooError> {
        match tag {
            b"int" | b"i4" | b"i8" => {
                let text = self.text_until(tag)?;
                text.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| OdooError::protocol(format!("bad integer '{}': {}", text, e)))
            }
            b"boolean" => match self.text_until(tag)?.trim() {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                other => Err(OdooError::protocol(format!("bad boolean '{}'", other))),
            },
            b"double" => {
                let text = self.text_until(tag)?;
                text.trim()
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|e| OdooError::protocol(format!("bad double '{}': {}", text, e)))
            }
            b"string" => Ok(Value::String(self.text_until(tag)?)),
            b"dateTime.iso8601" => Ok(Value::DateTime(self.text_until(tag)?.trim().to_string())),
            b"base64" => {
                let text = self.text_until(tag)?;
                let cleaned: String = text.split_whitespace().collect();
                STANDARD
                    .decode(cleaned)
                    .map(Value::Base64)
                    .map_err(|e| OdooError::protocol(format!("bad base64: {}", e)))
            }
            b"nil" => {
                self.expect_end(b"nil")?;
                Ok(Value::Nil)
            }
            b"struct" => self.struct_body(),
            b"array" => self.array_body(),
            other => Err(OdooError::protocol(format!(
                "unsupported value type <{}>",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    fn text_until(&mut self, tag: &[u8]) -> Result<String, OdooError> {
        let mut text = String::new();
        loop {
            match self.next_raw()? {
                Event::Text(t) => text.push_str(&t.unescape().map_err(xml)?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::End(e) if e.name().as_ref() == tag => return Ok(text),
                other => return Err(unexpected(tag, &other)),
            }
        }
    }

    fn struct_body(&mut self) -> Result<Value, OdooError> {
        let mut members = BTreeMap::new();
        loop {
            match self.next_structural()? {
                Event::Start(e) if e.name().as_ref() == b"member" => {
                    self.expect_start(b"name")?;
                    let name = self.text_until(b"name")?;
                    let value = self.value_after_start_tag()?;
                    self.expect_end(b"member")?;
                    members.insert(name, value);
                }
                Event::End(e) if e.name().as_ref() == b"struct" => {
                    return Ok(Value::Struct(members));
                }
                other => return Err(unexpected(b"member", &other)),
            }
        }
    }

    fn array_body(&mut self) -> Result<Value, OdooError> {
        let mut items = Vec::new();
        match self.next_structural()? {
            Event::Start(e) if e.name().as_ref() == b"data" => loop {
                match self.next_structural()? {
                    Event::Start(e) if e.name().as_ref() == b"value" => {
                        items.push(self.value_body()?);
                    }
                    Event::Empty(e) if e.name().as_ref() == b"value" => {
                        items.push(Value::String(String::new()));
                    }
                    Event::End(e) if e.name().as_ref() == b"data" => break,
                    other => return Err(unexpected(b"value", &other)),
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"data" => {}
            other => return Err(unexpected(b"data", &other)),
        }
        self.expect_end(b"array")?;
        Ok(Value::Array(items))
    }
}

fn empty_typed(tag: &[u8]) -> Result<Value, OdooError> {
    match tag {
        b"nil" => Ok(Value::Nil),
        b"string" => Ok(Value::String(String::new())),
        b"struct" => Ok(Value::Struct(BTreeMap::new())),
        b"base64" => Ok(Value::Base64(Vec::new())),
        other => Err(OdooError::protocol(format!(
            "empty <{}/> is not a valid value",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(|b| b.is_ascii_whitespace())
}

fn unexpected(expected: &[u8], found: &Event<'_>) -> OdooError {
    OdooError::protocol(format!(
        "expected <{}>, found {}",
        String::from_utf8_lossy(expected),
        describe(found)
    ))
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(e) => format!("<{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::End(e) => format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Empty(e) => format!("<{}/>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text".to_string(),
        Event::Eof => "end of document".to_string(),
        _ => "markup".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_authenticate_call() {
        let params = vec![
            Value::from("odoo"),
            Value::from("admin"),
            Value::from("s3cr<t"),
            Value::Struct(BTreeMap::new()),
        ];
        let xml = encode_call("authenticate", &params).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<methodName>authenticate</methodName>"));
        assert!(xml.contains("<value><string>odoo</string></value>"));
        assert!(xml.contains("<string>s3cr&lt;t</string>"));
        assert!(xml.contains("<value><struct></struct></value>"));
    }

    #[test]
    fn test_encode_nested_values() {
        let value = Value::from(json!([["state", "=", "sale"], {"limit": 20, "active": true}]));
        let xml = encode_call("execute_kw", &[value]).unwrap();

        assert!(xml.contains("<array><data><value><array><data><value><string>state</string>"));
        assert!(xml.contains("<member><name>active</name><value><boolean>1</boolean></value></member>"));
        assert!(xml.contains("<member><name>limit</name><value><int>20</int></value></member>"));
    }

    #[test]
    fn test_encode_large_int_and_nil() {
        let xml = encode_call("m", &[Value::Int(5_000_000_000), Value::Nil]).unwrap();
        assert!(xml.contains("<i8>5000000000</i8>"));
        assert!(xml.contains("<value><nil/></value>"));
    }

    #[test]
    fn test_decode_int_response() {
        let body = r#"<?xml version='1.0'?>
<methodResponse>
<params>
<param>
<value><int>7</int></value>
</param>
</params>
</methodResponse>
"#;
        assert_eq!(decode_response(body).unwrap(), Response::Success(Value::Int(7)));
    }

    #[test]
    fn test_decode_false_response() {
        let body = "<methodResponse><params><param><value><boolean>0</boolean></value></param></params></methodResponse>";
        let Response::Success(value) = decode_response(body).unwrap() else {
            panic!("expected success");
        };
        assert!(!value.is_truthy());
    }

    #[test]
    fn test_decode_search_read_records() {
        let body = r#"<?xml version='1.0'?>
<methodResponse>
<params>
<param>
<value><array><data>
<value><struct>
<member>
<name>id</name>
<value><int>12</int></value>
</member>
<member>
<name>name</name>
<value><string>S00012</string></value>
</member>
<member>
<name>partner_id</name>
<value><array><data>
<value><int>3</int></value>
<value><string>Deco Addict</string></value>
</data></array></value>
</member>
<member>
<name>amount_total</name>
<value><double>1250.5</double></value>
</member>
<member>
<name>note</name>
<value>  untyped text  </value>
</member>
</struct></value>
</data></array></value>
</param>
</params>
</methodResponse>
"#;
        let Response::Success(value) = decode_response(body).unwrap() else {
            panic!("expected success");
        };
        let json: serde_json::Value = value.into();
        assert_eq!(
            json,
            json!([{
                "id": 12,
                "name": "S00012",
                "partner_id": [3, "Deco Addict"],
                "amount_total": 1250.5,
                "note": "  untyped text  "
            }])
        );
    }

    #[test]
    fn test_decode_string_preserves_whitespace_and_entities() {
        let body = "<methodResponse><params><param><value><string> a &amp; b </string></value></param></params></methodResponse>";
        assert_eq!(
            decode_response(body).unwrap(),
            Response::Success(Value::String(" a & b ".to_string()))
        );
    }

    #[test]
    fn test_decode_fault() {
        let body = r#"<?xml version='1.0'?>
<methodResponse>
<fault>
<value><struct>
<member>
<name>faultCode</name>
<value><int>1</int></value>
</member>
<member>
<name>faultString</name>
<value><string>Record does not exist or has been deleted.</string></value>
</member>
</struct></value>
</fault>
</methodResponse>
"#;
        let Response::Fault(fault) = decode_response(body).unwrap() else {
            panic!("expected fault");
        };
        assert_eq!(fault.code, "1");
        assert!(fault.message.contains("does not exist"));
        assert!(!fault.is_access_denied());
    }

    #[test]
    fn test_access_denied_fault() {
        let fault = Fault {
            code: "3".to_string(),
            message: "Access Denied".to_string(),
        };
        assert!(fault.is_access_denied());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_response("<html><body>502 Bad Gateway</body></html>"),
            Err(OdooError::Protocol(_))
        ));
        assert!(decode_response("<methodResponse><params>").is_err());
    }

    #[test]
    fn test_base64_round_trip_through_json() {
        let body = "<methodResponse><params><param><value><base64>aGVsbG8=</base64></value></param></params></methodResponse>";
        let Response::Success(value) = decode_response(body).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(value, Value::Base64(b"hello".to_vec()));
        assert_eq!(serde_json::Value::from(value), json!("aGVsbG8="));
    }
}
