//! ALU Emulator - CLI Entry Point
//!
//! Commands:
//! - `alu-emu compute <op> <a> [b]` - Run one ALU operation
//! - `alu-emu set <addr> <value>` - Write a register
//! - `alu-emu flag <name> <on|off>` - Change a status flag
//! - `alu-emu dump` - Print the register file
//! - `alu-emu ops` - List the operation table
//! - `alu-emu test` - Built-in self-test
//!
//! With `--state <file>` the register file is loaded from and saved back to
//! a JSON snapshot, so consecutive invocations share registers.

use alu::cpu::{Arity, OPCODE_COUNT};
use alu::state::{load_or_create, save_state, Snapshot, StateError};
use alu::{Alu, OpCode, Registers};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alu-emu")]
#[command(version = "0.1.0")]
#[command(about = "ALU and register file of a small simulated processor")]
struct Cli {
    /// JSON snapshot of the register file, loaded if present and saved after changes
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    /// Number of general-purpose registers when no snapshot exists
    #[arg(short, long, default_value = "8", allow_negative_numbers = true, global = true)]
    registers: i64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one ALU operation
    Compute {
        /// Mnemonic (ADD, cmp, ...) or numeric code
        op: OpCode,
        /// First operand
        #[arg(allow_negative_numbers = true)]
        a: i32,
        /// Second operand, for binary operations
        #[arg(allow_negative_numbers = true)]
        b: Option<i32>,
        /// Store the result in this register
        #[arg(short, long)]
        dest: Option<i64>,
    },
    /// Write a register
    Set {
        address: i64,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Change a status flag (Z, C or N)
    Flag {
        name: String,
        setting: FlagState,
    },
    /// Print the register file
    Dump,
    /// List the operation table
    Ops,
    /// Run the built-in self-test
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum FlagState {
    On,
    Off,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Compute { op, a, b, dest }) => {
            let mut alu = open_alu(&cli.state, cli.registers);
            compute(&mut alu, op, a, b, dest);
            persist(&cli.state, alu.into_registers());
        }
        Some(Commands::Set { address, value }) => {
            let mut alu = open_alu(&cli.state, cli.registers);
            if let Err(e) = alu.set_register(address, value) {
                fail(&e);
            }
            persist(&cli.state, alu.into_registers());
        }
        Some(Commands::Flag { name, setting }) => {
            let mut alu = open_alu(&cli.state, cli.registers);
            let on = matches!(setting, FlagState::On);
            if let Err(e) = alu.registers_mut().set_flag_by_name(Some(&name), on) {
                fail(&e);
            }
            println!("{}", alu.registers().flags());
            persist(&cli.state, alu.into_registers());
        }
        Some(Commands::Dump) => {
            let alu = open_alu(&cli.state, cli.registers);
            print!("{}", alu.registers());
        }
        Some(Commands::Ops) => {
            list_ops();
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("ALU Emulator v0.1.0");
            println!();
            println!("Use --help for available commands");
            println!();
            list_ops();
        }
    }
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("❌ {}", e);
    std::process::exit(1);
}

fn open_alu(state: &Option<PathBuf>, count: i64) -> Alu {
    let registers = match state {
        Some(path) => load_or_create(path, count),
        None => Registers::new(count).map_err(StateError::from),
    };
    match registers {
        Ok(regs) => Alu::from_registers(regs),
        Err(e) => fail(&e),
    }
}

fn persist(state: &Option<PathBuf>, registers: Registers) {
    if let Some(path) = state {
        if let Err(e) = save_state(path, &Snapshot::new(registers)) {
            fail(&e);
        }
    }
}

fn compute(alu: &mut Alu, op: OpCode, a: i32, b: Option<i32>, dest: Option<i64>) {
    match alu.compute_op(op, a, b) {
        Ok(Some(value)) => {
            println!("{} = {}", op, value);
            if let Some(address) = dest {
                if let Err(e) = alu.set_register(address, value) {
                    fail(&e);
                }
                println!("→ R{}", address);
            }
        }
        Ok(None) => {
            println!("{}: {}", op, alu.registers().flags());
        }
        Err(e) => fail(&e),
    }
}

fn list_ops() {
    println!("━━━ Operation Table ━━━");
    for op in OpCode::ALL {
        let arity = match op.arity() {
            Arity::Unary => "a",
            Arity::Binary => "a, b",
        };
        println!("  {:2}  {:<6} {}", op.code(), op.mnemonic(), arity);
    }
}

fn run_self_test() {
    use alu::{AluError, Flag, RegisterError};

    println!("━━━ ALU Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };

    let mut alu = Alu::default();

    check("ADD 3 4 = 7", alu.compute(OpCode::Add.code(), 3, Some(4)) == Ok(Some(7)));

    check(
        "NOT rejects a second operand",
        matches!(
            alu.compute(OpCode::Not.code(), 5, Some(1)),
            Err(AluError::ArityMismatch { .. })
        ),
    );

    check(
        "DIV by zero is an error",
        alu.compute(OpCode::Div.code(), 1, Some(0)) == Err(AluError::DivisionByZero),
    );

    let _ = alu.compute(OpCode::Cmp.code(), 5, Some(5));
    let flags = alu.registers().flags();
    check("CMP 5 5 sets only Z", flags.zero && flags.count() == 1);

    let _ = alu.compute(OpCode::Cmp.code(), 2, Some(7));
    check(
        "CMP 2 7 sets only N",
        alu.registers().flag(Flag::Negative) && alu.registers().flags().count() == 1,
    );

    check(
        "unknown opcode rejected",
        alu.compute(OPCODE_COUNT as i32, 1, Some(1)) == Err(AluError::UnknownOpCode(OPCODE_COUNT as i32)),
    );

    let mut regs = Registers::default();
    let roundtrip = regs.write(1, -42).is_ok() && regs.read(1) == Ok(-42);
    check("register write/read roundtrip", roundtrip);

    check(
        "unwritten register read fails",
        regs.read(2) == Err(RegisterError::Uninitialized(2)),
    );

    check(
        "lowercase flag name rejected",
        matches!(
            regs.set_flag_by_name(Some("z"), true),
            Err(RegisterError::InvalidFlagName(_))
        ),
    );

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
