// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use rusqlite::{Connection, Error, Statement, ToSql, Transaction};
use std::fmt::Debug;

// Everything that touches the store goes through these two traits, so the driver and the DAO
// can be handed a connection rather than reaching for one. Dropping a TransactionWrapper that
// was never committed rolls the whole unit of work back.

pub trait ConnectionWrapper: Debug + Send {
    fn prepare(&self, query: &str) -> Result<Statement<'_>, Error>;
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<usize, Error>;
    fn transaction<'a>(&'a mut self) -> Result<Box<dyn TransactionWrapper + 'a>, Error>;
}

#[derive(Debug)]
pub struct ConnectionWrapperReal {
    conn: Connection,
}

impl ConnectionWrapper for ConnectionWrapperReal {
    fn prepare(&self, query: &str) -> Result<Statement<'_>, Error> {
        self.conn.prepare(query)
    }

    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<usize, Error> {
        self.conn.execute(query, params)
    }

    fn transaction<'a>(&'a mut self) -> Result<Box<dyn TransactionWrapper + 'a>, Error> {
        self.conn
            .transaction()
            .map(|tx| Box::new(TransactionWrapperReal::new(tx)) as Box<dyn TransactionWrapper + 'a>)
    }
}

impl ConnectionWrapperReal {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

pub trait TransactionWrapper: Debug {
    fn prepare(&self, query: &str) -> Result<Statement<'_>, Error>;
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<usize, Error>;
    fn commit(self: Box<Self>) -> Result<(), Error>;
}

#[derive(Debug)]
pub struct TransactionWrapperReal<'a> {
    transaction: Transaction<'a>,
}

impl<'a> TransactionWrapperReal<'a> {
    fn new(transaction: Transaction<'a>) -> TransactionWrapperReal<'a> {
        Self { transaction }
    }
}

impl<'a> TransactionWrapper for TransactionWrapperReal<'a> {
    fn prepare(&self, query: &str) -> Result<Statement<'_>, Error> {
        self.transaction.prepare(query)
    }

    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<usize, Error> {
        self.transaction.execute(query, params)
    }

    fn commit(self: Box<Self>) -> Result<(), Error> {
        self.transaction.commit()
    }
}
