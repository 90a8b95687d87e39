//! Initial database migration.
//!
//! Creates the enums, expense and journal tables, the field metadata tables,
//! naming sequences, and the balance trigger, then seeds the standard fields
//! of each document type.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS & SEQUENCES
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(SEQUENCES_SQL).await?;

        // ============================================================
        // PART 2: USERS & SETUP
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTING_DIMENSIONS_SQL).await?;
        db.execute_unprepared(MODE_OF_PAYMENT_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: FIELD METADATA
        // ============================================================
        db.execute_unprepared(DOC_FIELDS_SQL).await?;
        db.execute_unprepared(CUSTOM_FIELDS_SQL).await?;

        // ============================================================
        // PART 4: EXPENSE ENTRIES
        // ============================================================
        db.execute_unprepared(EXPENSE_ENTRIES_SQL).await?;

        // ============================================================
        // PART 5: JOURNAL ENTRIES
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 6: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_DOC_FIELDS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM (
    'owner',
    'admin',
    'approver',
    'accountant',
    'submitter',
    'viewer'
);

-- Expense entry workflow status
CREATE TYPE expense_status AS ENUM (
    'draft',
    'submitted',
    'approved',
    'cancelled'
);
";

const SEQUENCES_SQL: &str = r"
-- Naming series: EXP-00001, JV-00001
CREATE SEQUENCE expense_entry_seq START 1;
CREATE SEQUENCE journal_entry_seq START 1;
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    first_name VARCHAR(140) NOT NULL,
    last_name VARCHAR(140),
    role user_role NOT NULL DEFAULT 'submitter',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;
";

const ACCOUNTING_DIMENSIONS_SQL: &str = r"
CREATE TABLE accounting_dimensions (
    name VARCHAR(140) PRIMARY KEY,
    fieldname VARCHAR(140) NOT NULL UNIQUE,
    label VARCHAR(140) NOT NULL,
    document_type VARCHAR(140) NOT NULL,
    mandatory_for_bs BOOLEAN NOT NULL DEFAULT false,
    mandatory_for_pl BOOLEAN NOT NULL DEFAULT false,
    disabled BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_dimension_fieldname CHECK (fieldname ~ '^[a-z][a-z0-9_]*$')
);
";

const MODE_OF_PAYMENT_ACCOUNTS_SQL: &str = r"
CREATE TABLE mode_of_payment_accounts (
    mode_of_payment VARCHAR(140) NOT NULL,
    company VARCHAR(140) NOT NULL,
    default_account VARCHAR(140) NOT NULL,

    PRIMARY KEY (mode_of_payment, company)
);
";

const DOC_FIELDS_SQL: &str = r"
-- Standard fields of each document type
CREATE TABLE doc_fields (
    doctype VARCHAR(140) NOT NULL,
    fieldname VARCHAR(140) NOT NULL,
    label VARCHAR(140) NOT NULL,
    fieldtype VARCHAR(40) NOT NULL,
    options VARCHAR(140),
    idx INTEGER NOT NULL,

    PRIMARY KEY (doctype, fieldname)
);
";

const CUSTOM_FIELDS_SQL: &str = r"
-- Fields added at runtime (accounting dimension fields)
CREATE TABLE custom_fields (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    doctype VARCHAR(140) NOT NULL,
    fieldname VARCHAR(140) NOT NULL,
    label VARCHAR(140) NOT NULL,
    fieldtype VARCHAR(40) NOT NULL,
    options VARCHAR(140),
    insert_after VARCHAR(140),
    in_list_view BOOLEAN NOT NULL DEFAULT false,
    in_standard_filter BOOLEAN NOT NULL DEFAULT false,
    reqd BOOLEAN NOT NULL DEFAULT false,
    description TEXT,
    columns SMALLINT,
    collapsible BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_custom_field UNIQUE (doctype, fieldname)
);

CREATE INDEX idx_custom_fields_doctype ON custom_fields(doctype);
";

const EXPENSE_ENTRIES_SQL: &str = r"
CREATE TABLE expense_entries (
    name VARCHAR(140) PRIMARY KEY,
    status expense_status NOT NULL DEFAULT 'draft',
    company VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    total NUMERIC(18, 2) NOT NULL DEFAULT 0,
    quantity INTEGER NOT NULL DEFAULT 0,
    default_dimensions JSONB NOT NULL DEFAULT '{}',
    mode_of_payment VARCHAR(140) NOT NULL,
    payment_reference VARCHAR(140),
    clearance_date DATE,
    payment_to VARCHAR(140),
    remarks TEXT,
    approved_by VARCHAR(280),
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_expense_total_non_negative CHECK (total >= 0)
);

CREATE INDEX idx_expense_entries_status ON expense_entries(status, posting_date DESC);

CREATE TABLE expense_entry_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent VARCHAR(140) NOT NULL REFERENCES expense_entries(name) ON DELETE CASCADE,
    idx INTEGER NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    expense_account VARCHAR(140) NOT NULL,
    dimensions JSONB NOT NULL DEFAULT '{}',

    CONSTRAINT chk_item_amount_non_negative CHECK (amount >= 0),
    CONSTRAINT uq_expense_item_idx UNIQUE (parent, idx)
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    name VARCHAR(140) PRIMARY KEY,
    title VARCHAR(140) NOT NULL,
    voucher_type VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    company VARCHAR(140) NOT NULL,
    user_remark TEXT,
    mode_of_payment VARCHAR(140) NOT NULL,
    cheque_no VARCHAR(140),
    cheque_date DATE,
    reference_date DATE,
    pay_to_recd_from VARCHAR(140),
    bill_no VARCHAR(140) NOT NULL,
    docstatus SMALLINT NOT NULL DEFAULT 0,
    total_debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- One journal entry per expense entry
    CONSTRAINT uq_journal_entries_bill_no UNIQUE (bill_no),
    CONSTRAINT chk_docstatus CHECK (docstatus IN (0, 1, 2))
);

CREATE TABLE journal_entry_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent VARCHAR(140) NOT NULL REFERENCES journal_entries(name) ON DELETE CASCADE,
    idx INTEGER NOT NULL,
    account VARCHAR(140) NOT NULL,
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    user_remark TEXT,
    dimensions JSONB NOT NULL DEFAULT '{}',

    CONSTRAINT chk_one_sided CHECK (
        (debit >= 0 AND credit = 0) OR (debit = 0 AND credit >= 0)
    )
);

CREATE INDEX idx_journal_entry_accounts_parent ON journal_entry_accounts(parent, idx);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: check_journal_balance
-- Submitted journal entries must balance (debit = credit)
-- ============================================================
CREATE OR REPLACE FUNCTION check_journal_balance()
RETURNS TRIGGER AS $$
DECLARE
    sum_debit NUMERIC(18, 2);
    sum_credit NUMERIC(18, 2);
BEGIN
    IF NEW.docstatus = 1 THEN
        SELECT
            COALESCE(SUM(debit), 0),
            COALESCE(SUM(credit), 0)
        INTO sum_debit, sum_credit
        FROM journal_entry_accounts
        WHERE parent = NEW.name;

        IF sum_debit <> sum_credit THEN
            RAISE EXCEPTION 'Journal entry % is not balanced. Debit: %, Credit: %',
                NEW.name, sum_debit, sum_credit;
        END IF;
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE CONSTRAINT TRIGGER trg_check_journal_balance
AFTER INSERT OR UPDATE ON journal_entries
DEFERRABLE INITIALLY DEFERRED
FOR EACH ROW
EXECUTE FUNCTION check_journal_balance();
";

const SEED_DOC_FIELDS_SQL: &str = r"
INSERT INTO doc_fields (doctype, fieldname, label, fieldtype, options, idx) VALUES
    ('Expense Entry', 'company', 'Company', 'Link', 'Company', 1),
    ('Expense Entry', 'posting_date', 'Posting Date', 'Date', NULL, 2),
    ('Expense Entry', 'status', 'Status', 'Select', NULL, 3),
    ('Expense Entry', 'accounting_dimensions_section', 'Accounting Dimensions', 'Section Break', NULL, 4),
    ('Expense Entry', 'default_cost_center', 'Default Cost Center', 'Link', 'Cost Center', 5),
    ('Expense Entry', 'accounting_col', '', 'Column Break', NULL, 6),
    ('Expense Entry', 'default_project', 'Default Project', 'Link', 'Project', 7),
    ('Expense Entry', 'expenses', 'Expenses', 'Table', 'Expense Entry Item', 8),
    ('Expense Entry', 'total', 'Total', 'Currency', NULL, 9),
    ('Expense Entry', 'quantity', 'Quantity', 'Int', NULL, 10),
    ('Expense Entry', 'mode_of_payment', 'Mode of Payment', 'Link', 'Mode of Payment', 11),
    ('Expense Entry', 'payment_reference', 'Payment Reference', 'Data', NULL, 12),
    ('Expense Entry', 'clearance_date', 'Clearance Date', 'Date', NULL, 13),
    ('Expense Entry', 'payment_to', 'Payment To', 'Data', NULL, 14),
    ('Expense Entry', 'remarks', 'Remarks', 'Small Text', NULL, 15),
    ('Expense Entry', 'approved_by', 'Approved By', 'Data', NULL, 16),
    ('Expense Entry Item', 'expense_account', 'Expense Account', 'Link', 'Account', 1),
    ('Expense Entry Item', 'description', 'Description', 'Small Text', NULL, 2),
    ('Expense Entry Item', 'amount', 'Amount', 'Currency', NULL, 3),
    ('Expense Entry Item', 'project', 'Project', 'Link', 'Project', 4),
    ('Expense Entry Item', 'cost_center', 'Cost Center', 'Link', 'Cost Center', 5),
    ('Cost Center', 'cost_center_name', 'Cost Center Name', 'Data', NULL, 1),
    ('Cost Center', 'company', 'Company', 'Link', 'Company', 2),
    ('Cost Center', 'is_group', 'Is Group', 'Check', NULL, 3),
    ('Project', 'project_name', 'Project Name', 'Data', NULL, 1),
    ('Project', 'company', 'Company', 'Link', 'Company', 2),
    ('Project', 'status', 'Status', 'Select', NULL, 3),
    ('Department', 'department_name', 'Department', 'Data', NULL, 1),
    ('Department', 'company', 'Company', 'Link', 'Company', 2),
    ('Department', 'disabled', 'Disabled', 'Check', NULL, 3),
    ('Territory', 'territory_name', 'Territory Name', 'Data', NULL, 1),
    ('Territory', 'disabled', 'Disabled', 'Check', NULL, 2);
";

const DROP_ALL_SQL: &str = r"
-- Drop triggers and functions
DROP TRIGGER IF EXISTS trg_check_journal_balance ON journal_entries;
DROP FUNCTION IF EXISTS check_journal_balance();

-- Drop tables (children first)
DROP TABLE IF EXISTS journal_entry_accounts CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS expense_entry_items CASCADE;
DROP TABLE IF EXISTS expense_entries CASCADE;
DROP TABLE IF EXISTS custom_fields CASCADE;
DROP TABLE IF EXISTS doc_fields CASCADE;
DROP TABLE IF EXISTS mode_of_payment_accounts CASCADE;
DROP TABLE IF EXISTS accounting_dimensions CASCADE;
DROP TABLE IF EXISTS users CASCADE;

-- Drop sequences and enums
DROP SEQUENCE IF EXISTS journal_entry_seq;
DROP SEQUENCE IF EXISTS expense_entry_seq;
DROP TYPE IF EXISTS expense_status;
DROP TYPE IF EXISTS user_role;
";
