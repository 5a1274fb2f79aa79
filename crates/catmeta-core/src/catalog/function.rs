//! Tracked SQL functions and their introspected overloads.

use crate::decode::{
    json_record, read_keyword, FieldSpec, FromJson, JsonPath, Keyword, Record, RecordReader,
    RecordSpec, RecordWriter, ToJson,
};
use crate::error::DecodeResult;
use crate::ident::{Oid, QualifiedFunction, QualifiedType};
use serde_json::Value;

/// Function volatility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Volatility {
    Volatile,
    Stable,
    Immutable,
}

impl Keyword for Volatility {
    const KIND: &'static str = "function volatility";
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("VOLATILE", Volatility::Volatile),
        ("STABLE", Volatility::Stable),
        ("IMMUTABLE", Volatility::Immutable),
    ];
}

impl FromJson for Volatility {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        read_keyword(value, path)
    }
}

impl ToJson for Volatility {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

/// One overload of a function, as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawFunction {
    /// Function OID.
    pub oid: Oid,
    pub volatility: Volatility,
    /// Return type, or the row type for set-returning table functions.
    pub return_type: QualifiedType,
    pub returns_set: bool,
    /// Whether the return type is a table's row type.
    pub returns_table: bool,
    /// Argument types in declaration order.
    pub input_arg_types: Vec<QualifiedType>,
    /// Argument names; unnamed arguments are empty strings.
    pub input_arg_names: Vec<String>,
    /// Number of trailing arguments with defaults.
    pub default_args: u32,
    pub description: Option<String>,
}

impl RawFunction {
    /// Number of declared arguments.
    pub fn arity(&self) -> usize {
        self.input_arg_types.len()
    }
}

const OID: FieldSpec = FieldSpec::required("oid", "oid");
const VOLATILITY: FieldSpec = FieldSpec::required("volatility", "function_type");
const RETURN_TYPE: FieldSpec = FieldSpec::required("return_type", "return_type");
const RETURNS_SET: FieldSpec = FieldSpec::required("returns_set", "returns_set");
const RETURNS_TABLE: FieldSpec = FieldSpec::required("returns_table", "returns_table");
const INPUT_ARG_TYPES: FieldSpec = FieldSpec::required("input_arg_types", "input_arg_types");
const INPUT_ARG_NAMES: FieldSpec = FieldSpec::required("input_arg_names", "input_arg_names");
const DEFAULT_ARGS: FieldSpec = FieldSpec::required("default_args", "default_args");
const DESCRIPTION: FieldSpec = FieldSpec::optional("description", "description");

impl Record for RawFunction {
    const SPEC: RecordSpec = RecordSpec {
        entity: "function overload",
        fields: &[
            OID,
            VOLATILITY,
            RETURN_TYPE,
            RETURNS_SET,
            RETURNS_TABLE,
            INPUT_ARG_TYPES,
            INPUT_ARG_NAMES,
            DEFAULT_ARGS,
            DESCRIPTION,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let oid: Oid = reader.required(&OID)?;
        reader.identify(format_args!("oid {}", oid));

        Ok(Self {
            oid,
            volatility: reader.required(&VOLATILITY)?,
            return_type: reader.required(&RETURN_TYPE)?,
            returns_set: reader.required(&RETURNS_SET)?,
            returns_table: reader.required(&RETURNS_TABLE)?,
            input_arg_types: reader.required(&INPUT_ARG_TYPES)?,
            input_arg_names: reader.required(&INPUT_ARG_NAMES)?,
            default_args: reader.required(&DEFAULT_ARGS)?,
            description: reader.optional(&DESCRIPTION)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&OID, &self.oid);
        writer.put(&VOLATILITY, &self.volatility);
        writer.put(&RETURN_TYPE, &self.return_type);
        writer.put(&RETURNS_SET, &self.returns_set);
        writer.put(&RETURNS_TABLE, &self.returns_table);
        writer.put(&INPUT_ARG_TYPES, &self.input_arg_types);
        writer.put(&INPUT_ARG_NAMES, &self.input_arg_names);
        writer.put(&DEFAULT_ARGS, &self.default_args);
        writer.put_optional(&DESCRIPTION, &self.description);
    }
}

/// Per-function configuration stored in metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FunctionConfig {
    /// Argument that receives the session variables, if any.
    pub session_argument: Option<String>,
}

const SESSION_ARGUMENT: FieldSpec = FieldSpec::optional("session_argument", "session_argument");

impl Record for FunctionConfig {
    const SPEC: RecordSpec = RecordSpec {
        entity: "function configuration",
        fields: &[SESSION_ARGUMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            session_argument: reader.optional(&SESSION_ARGUMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put_optional(&SESSION_ARGUMENT, &self.session_argument);
    }
}

/// A tracked function.
///
/// Overloads sharing the name are kept in introspection order; choosing
/// between them is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: QualifiedFunction,
    pub is_system_defined: bool,
    pub configuration: FunctionConfig,
    pub overloads: Vec<RawFunction>,
}

const FUNCTION_NAME: FieldSpec = FieldSpec::required("name", "function");
const FUNCTION_IS_SYSTEM_DEFINED: FieldSpec =
    FieldSpec::required("is_system_defined", "is_system_defined");
const FUNCTION_CONFIGURATION: FieldSpec = FieldSpec::required("configuration", "configuration");
const FUNCTION_OVERLOADS: FieldSpec = FieldSpec::required("overloads", "info");

impl Record for Function {
    const SPEC: RecordSpec = RecordSpec {
        entity: "function",
        fields: &[
            FUNCTION_NAME,
            FUNCTION_IS_SYSTEM_DEFINED,
            FUNCTION_CONFIGURATION,
            FUNCTION_OVERLOADS,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: QualifiedFunction = reader.required(&FUNCTION_NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            is_system_defined: reader.required(&FUNCTION_IS_SYSTEM_DEFINED)?,
            configuration: reader.required(&FUNCTION_CONFIGURATION)?,
            overloads: reader.required(&FUNCTION_OVERLOADS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&FUNCTION_NAME, &self.name);
        writer.put(&FUNCTION_IS_SYSTEM_DEFINED, &self.is_system_defined);
        writer.put(&FUNCTION_CONFIGURATION, &self.configuration);
        writer.put(&FUNCTION_OVERLOADS, &self.overloads);
    }
}

json_record!(RawFunction, FunctionConfig, Function);

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn search_orders_overload(oid: u32, args: &[&str]) -> Value {
        let arg_types: Vec<Value> = args
            .iter()
            .map(|a| json!({"schema": "pg_catalog", "name": a}))
            .collect();
        let arg_names: Vec<&str> = args.iter().map(|_| "").collect();

        json!({
            "oid": oid,
            "function_type": "STABLE",
            "return_type": {"schema": "public", "name": "orders"},
            "returns_set": true,
            "returns_table": true,
            "input_arg_types": arg_types,
            "input_arg_names": arg_names,
            "default_args": 0
        })
    }

    #[test]
    fn test_decode_overload_set() {
        let function = Function::from_json(&json!({
            "function": {"schema": "public", "name": "search_orders"},
            "is_system_defined": false,
            "configuration": {},
            "info": [
                search_orders_overload(24601, &["text"]),
                search_orders_overload(24602, &["text", "int4"])
            ]
        }))
        .unwrap();

        assert_eq!(function.name.to_string(), "public.search_orders");
        assert_eq!(function.overloads.len(), 2);
        assert_eq!(function.overloads[0].arity(), 1);
        assert_eq!(function.overloads[1].arity(), 2);
        assert_eq!(function.overloads[1].volatility, Volatility::Stable);
        assert!(function.configuration.session_argument.is_none());
    }

    #[test]
    fn test_bad_volatility_path() {
        let mut overload = search_orders_overload(24601, &["text"]);
        overload["function_type"] = json!("stable");

        let err = Function::from_json(&json!({
            "function": "search_orders",
            "is_system_defined": false,
            "configuration": {"session_argument": "hasura_session"},
            "info": [overload]
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid value at $ (function public.search_orders).info[0] \
             (function overload oid 24601).function_type: unknown function volatility \
             `stable`, expected one of `VOLATILE`, `STABLE`, `IMMUTABLE`"
        );
    }

    #[test]
    fn test_function_round_trip() {
        let function = Function::from_json(&json!({
            "function": "search_orders",
            "is_system_defined": true,
            "configuration": {"session_argument": "hasura_session"},
            "info": [search_orders_overload(24601, &["text"])]
        }))
        .unwrap();

        assert_eq!(Function::from_json(&function.to_json()).unwrap(), function);
    }
}
