#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use sql_wrapper::prelude::*;

/// Knobs and observations shared between a scripted connector and the test.
#[derive(Debug, Default)]
pub struct Script {
    pub fail_connect: bool,
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub fail_rollback: bool,
    pub pending_error: Option<String>,
    pub rows: Vec<Vec<RowValues>>,
    pub log: Mutex<Log>,
}

#[derive(Debug, Default)]
pub struct Log {
    pub opens: usize,
    pub closes: usize,
    pub charsets: Vec<String>,
    pub configs: Vec<ResolvedConfig>,
    pub executed: Vec<(String, Vec<RowValues>)>,
    pub calls: Vec<&'static str>,
}

impl Script {
    pub fn opens(&self) -> usize {
        self.log.lock().unwrap().opens
    }

    pub fn closes(&self) -> usize {
        self.log.lock().unwrap().closes
    }

    pub fn executed(&self) -> Vec<(String, Vec<RowValues>)> {
        self.log.lock().unwrap().executed.clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn configs(&self) -> Vec<ResolvedConfig> {
        self.log.lock().unwrap().configs.clone()
    }
}

/// Connector that records what the executor asks of it.
#[derive(Debug, Clone)]
pub struct ScriptedConnector {
    pub script: Arc<Script>,
}

impl ScriptedConnector {
    pub fn new(script: Script) -> Self {
        Self {
            script: Arc::new(script),
        }
    }
}

pub fn scripted(script: Script) -> (Database<ScriptedConnector>, Arc<Script>) {
    let connector = ScriptedConnector::new(script);
    let handle = Arc::clone(&connector.script);
    (
        Database::with_connector(connector, ConnectionConfig::new()),
        handle,
    )
}

pub struct ScriptedConnection {
    script: Arc<Script>,
}

impl Connector for ScriptedConnector {
    type Connection = ScriptedConnection;

    fn connect(&self, config: &ResolvedConfig) -> Result<ScriptedConnection, DriverError> {
        if self.script.fail_connect {
            return Err(DriverError::new("Access denied for user"));
        }
        let mut log = self.script.log.lock().unwrap();
        log.opens += 1;
        log.configs.push(config.clone());
        Ok(ScriptedConnection {
            script: Arc::clone(&self.script),
        })
    }
}

impl ScriptedConnection {
    fn record(&self, call: &'static str) {
        self.script.log.lock().unwrap().calls.push(call);
    }
}

impl DriverConnection for ScriptedConnection {
    type Statement<'conn>
        = ScriptedStatement<'conn>
    where
        Self: 'conn;

    fn set_charset(&mut self, charset: &str) -> Result<(), DriverError> {
        self.script
            .log
            .lock()
            .unwrap()
            .charsets
            .push(charset.to_string());
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<ScriptedStatement<'_>, DriverError> {
        if sql.contains("SYNTAX ERROR") {
            return Err(DriverError::new("You have an error in your SQL syntax"));
        }
        Ok(ScriptedStatement {
            conn: self,
            sql: sql.to_string(),
            values: Vec::new(),
        })
    }

    fn begin(&mut self) -> Result<(), DriverError> {
        self.record("begin");
        if self.script.fail_begin {
            Err(DriverError::new("begin refused"))
        } else {
            Ok(())
        }
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        self.record("commit");
        if self.script.fail_commit {
            Err(DriverError::new("commit refused"))
        } else {
            Ok(())
        }
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        self.record("rollback");
        if self.script.fail_rollback {
            Err(DriverError::new("rollback refused"))
        } else {
            Ok(())
        }
    }

    fn pending_error(&self) -> Option<String> {
        self.script.pending_error.clone()
    }

    fn close(self) -> Result<(), DriverError> {
        self.script.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

pub struct ScriptedStatement<'conn> {
    conn: &'conn mut ScriptedConnection,
    sql: String,
    values: Vec<RowValues>,
}

impl ScriptedStatement<'_> {
    fn finish(&mut self) {
        let values = std::mem::take(&mut self.values);
        self.conn
            .script
            .log
            .lock()
            .unwrap()
            .executed
            .push((self.sql.clone(), values));
    }
}

impl DriverStatement for ScriptedStatement<'_> {
    fn parameter_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    fn bind(&mut self, position: usize, value: &RowValues) -> Result<(), DriverError> {
        if position == 0 || position > self.parameter_count() {
            return Err(DriverError::new(format!("bind position {position} out of range")));
        }
        self.values.push(value.clone());
        Ok(())
    }

    fn fetch(&mut self) -> Result<Option<ResultSet>, DriverError> {
        self.finish();
        if self.sql.starts_with("UPDATE") {
            return Ok(None);
        }
        let width = self.conn.script.rows.first().map_or(1, Vec::len);
        let mut rs = ResultSet::new((0..width).map(|i| format!("c{i}")).collect());
        for row in &self.conn.script.rows {
            rs.add_row_values(row.clone());
        }
        Ok(Some(rs))
    }

    fn execute(&mut self) -> Result<ExecuteResult, DriverError> {
        self.finish();
        if self.sql.contains("duplicate") {
            return Err(DriverError::new("Duplicate entry '1' for key 'PRIMARY'"));
        }
        Ok(ExecuteResult {
            affected_rows: 1,
            insert_id: 42,
        })
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
