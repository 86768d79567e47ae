//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502/6507 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Instruction register** (IR): last opcode fetched
//! - **Execution status**: stop / fatal-error / IRQ / NMI condition bits
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction
//! - `execute(n)`: Execute up to `n` instructions, servicing pending
//!   interrupts between instructions (`n == 0` runs until stopped)
//!
//! Every executed instruction reports its full cycle cost (base cycles plus
//! page-crossing and branch penalties) to the bus through
//! `MemoryBus::increment_cycles`, so bus-side timers advance in step with
//! the processor.

use crate::{ExecutionError, MemoryBus, OPCODE_TABLE};

/// Lookup tables for binary-coded-decimal arithmetic.
///
/// `BCD_TABLE[0][v]` converts a BCD byte to its binary magnitude;
/// `BCD_TABLE[1][v]` converts a binary value (taken modulo 100) back to BCD.
/// ADC/SBC in decimal mode run their math through these tables, matching the
/// original NMOS correction behavior.
pub(crate) const BCD_TABLE: [[u8; 256]; 2] = build_bcd_table();

const fn build_bcd_table() -> [[u8; 256]; 2] {
    let mut table = [[0u8; 256]; 2];
    let mut t = 0;
    while t < 256 {
        table[0][t] = ((t >> 4) * 10 + (t & 0x0F)) as u8;
        table[1][t] = ((((t % 100) / 10) << 4) | (t % 10)) as u8;
        t += 1;
    }
    table
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags,
/// program counter, stack pointer, and cycle counter. It is generic over the
/// memory implementation via the `MemoryBus` trait and owns its bus for the
/// duration of its life.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use lib6507::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.flag_i(), true); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Instruction register (last opcode fetched)
    pub(crate) ir: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (bit 4 of the pushed status byte)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Pending-condition bits: stop, fatal error, IRQ, NMI
    pub(crate) execution_status: u8,

    /// Whether the last bus access was a read (some devices resolve
    /// ambiguous accesses with this)
    pub(crate) last_access_was_read: bool,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Total instructions executed
    pub(crate) instruction_count: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Stop execution at the next inter-instruction check.
    pub const STOP_EXECUTION: u8 = 0x01;
    /// An unrecoverable error occurred (illegal opcode fetched).
    pub const FATAL_ERROR: u8 = 0x02;
    /// A maskable interrupt is pending.
    pub const MASKABLE_INTERRUPT: u8 = 0x04;
    /// A non-maskable interrupt is pending.
    pub const NONMASKABLE_INTERRUPT: u8 = 0x08;

    /// Number of system cycles per processor cycle. The 6507 runs the bus at
    /// processor speed; kept as a named constant so a scaled part could
    /// change it.
    pub const SYSTEM_CYCLES_PER_PROCESSOR_CYCLE: u32 = 1;

    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to the 6502 power-on reset state:
    /// - Program counter (PC) is loaded from the reset vector at addresses
    ///   0xFFFC/0xFFFD (little-endian)
    /// - Stack pointer (SP) is set to 0xFD
    /// - Status register has Interrupt Disable flag set (I = true)
    /// - All other registers (A, X, Y) are zeroed
    /// - Cycle counter is reset to 0
    ///
    /// # Arguments
    ///
    /// * `memory` - A MemoryBus implementation that provides the reset
    ///   vector
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6507::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// ```
    pub fn new(mut memory: M) -> Self {
        // Read reset vector from 0xFFFC/0xFFFD (little-endian)
        let pc_low = memory.read(0xFFFC) as u16;
        let pc_high = memory.read(0xFFFD) as u16;
        let pc = (pc_high << 8) | pc_low;

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc,
            sp: 0xFD,
            ir: 0x00,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: true, // Interrupt disable set on reset
            flag_z: false,
            flag_c: false,
            execution_status: 0,
            last_access_was_read: true,
            cycles: 0,
            instruction_count: 0,
            memory,
        }
    }

    /// Resets the processor to its power-on state.
    ///
    /// Re-reads the reset vector, restores SP to 0xFD, sets the interrupt
    /// disable flag, zeroes A/X/Y (undefined on real hardware), and clears
    /// all pending execution-status conditions. The cycle and instruction
    /// counters are not touched; the owning system rebases its own counter.
    pub fn reset(&mut self) {
        let pc_low = self.memory.read(0xFFFC) as u16;
        let pc_high = self.memory.read(0xFFFD) as u16;
        self.pc = (pc_high << 8) | pc_low;

        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.sp = 0xFD;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;
        self.execution_status = 0;
        self.last_access_was_read = true;
    }

    /// Requests a maskable interrupt.
    ///
    /// The interrupt is serviced between instructions, and only while the
    /// I flag is clear. The request stays pending until serviced.
    pub fn irq(&mut self) {
        self.execution_status |= Self::MASKABLE_INTERRUPT;
    }

    /// Requests a non-maskable interrupt.
    ///
    /// Serviced between instructions regardless of the I flag.
    pub fn nmi(&mut self) {
        self.execution_status |= Self::NONMASKABLE_INTERRUPT;
    }

    /// Tells the processor to stop executing instructions.
    ///
    /// Cooperative: takes effect at the next inter-instruction check inside
    /// `execute`.
    pub fn stop(&mut self) {
        self.execution_status |= Self::STOP_EXECUTION;
    }

    /// Answers true iff a fatal error has occurred from which the processor
    /// cannot recover (illegal opcode).
    pub fn fatal_error(&self) -> bool {
        self.execution_status & Self::FATAL_ERROR != 0
    }

    /// Gets the addressing mode of the specified opcode.
    pub fn addressing_mode(opcode: u8) -> crate::AddressingMode {
        OPCODE_TABLE[opcode as usize].addressing_mode
    }

    /// Executes instructions until the requested count is reached, someone
    /// stops execution, or a fatal error occurs.
    ///
    /// Pending interrupts are serviced between instructions: NMI
    /// unconditionally, IRQ only while the I flag is clear. Servicing
    /// pushes PC and status (with B clear), sets I, and jumps through
    /// 0xFFFA (NMI) or 0xFFFE (IRQ).
    ///
    /// # Arguments
    ///
    /// * `number` - Number of instructions to execute; 0 means run until
    ///   stopped
    ///
    /// # Returns
    ///
    /// `true` iff execution stopped normally (count reached or `stop()`
    /// honored); `false` on a fatal error, in which case `fatal_error()`
    /// answers true and the PC still addresses the offending opcode.
    pub fn execute(&mut self, number: u32) -> bool {
        let mut executed = 0u32;

        while number == 0 || executed < number {
            // Service pending interrupts between instructions: NMI first,
            // then IRQ gated on the I flag.
            if self.execution_status & Self::NONMASKABLE_INTERRUPT != 0 {
                self.execution_status &= !Self::NONMASKABLE_INTERRUPT;
                self.interrupt(0xFFFA);
            } else if self.execution_status & Self::MASKABLE_INTERRUPT != 0 && !self.flag_i {
                self.execution_status &= !Self::MASKABLE_INTERRUPT;
                self.interrupt(0xFFFE);
            }

            if self.execution_status & Self::STOP_EXECUTION != 0 {
                self.execution_status &= !Self::STOP_EXECUTION;
                return true;
            }

            if self.step().is_err() {
                return false;
            }
            executed += 1;
        }

        true
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at current PC into IR
    /// 2. Look up instruction metadata in opcode table
    /// 3. Dispatch to the instruction implementation
    ///
    /// On an illegal opcode the fatal-error status bit is raised, the PC is
    /// left addressing the offending byte, and an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6507::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert!(cpu.step().is_ok());
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        // Fetch opcode at PC
        let opcode = self.read(self.pc);
        self.ir = opcode;

        // Decode: look up in opcode table
        let metadata = &OPCODE_TABLE[opcode as usize];

        if !metadata.legal {
            // Leave PC on the offending byte so callers can report it.
            self.execution_status |= Self::FATAL_ERROR;
            return Err(ExecutionError::IllegalOpcode(opcode));
        }

        // Execute instruction based on mnemonic
        match metadata.mnemonic {
            "ADC" => crate::instructions::alu::execute_adc(self, opcode)?,
            "AND" => crate::instructions::alu::execute_and(self, opcode)?,
            "ASL" => crate::instructions::shifts::execute_asl(self, opcode)?,
            "BCC" => crate::instructions::branches::execute_bcc(self, opcode)?,
            "BCS" => crate::instructions::branches::execute_bcs(self, opcode)?,
            "BEQ" => crate::instructions::branches::execute_beq(self, opcode)?,
            "BIT" => crate::instructions::alu::execute_bit(self, opcode)?,
            "BMI" => crate::instructions::branches::execute_bmi(self, opcode)?,
            "BNE" => crate::instructions::branches::execute_bne(self, opcode)?,
            "BPL" => crate::instructions::branches::execute_bpl(self, opcode)?,
            "BRK" => crate::instructions::control::execute_brk(self, opcode)?,
            "BVC" => crate::instructions::branches::execute_bvc(self, opcode)?,
            "BVS" => crate::instructions::branches::execute_bvs(self, opcode)?,
            "CLC" => crate::instructions::flags::execute_clc(self, opcode)?,
            "CLD" => crate::instructions::flags::execute_cld(self, opcode)?,
            "CLI" => crate::instructions::flags::execute_cli(self, opcode)?,
            "CLV" => crate::instructions::flags::execute_clv(self, opcode)?,
            "CMP" => crate::instructions::alu::execute_cmp(self, opcode)?,
            "CPX" => crate::instructions::alu::execute_cpx(self, opcode)?,
            "CPY" => crate::instructions::alu::execute_cpy(self, opcode)?,
            "DEC" => crate::instructions::inc_dec::execute_dec(self, opcode)?,
            "DEX" => crate::instructions::inc_dec::execute_dex(self, opcode)?,
            "DEY" => crate::instructions::inc_dec::execute_dey(self, opcode)?,
            "EOR" => crate::instructions::alu::execute_eor(self, opcode)?,
            "INC" => crate::instructions::inc_dec::execute_inc(self, opcode)?,
            "INX" => crate::instructions::inc_dec::execute_inx(self, opcode)?,
            "INY" => crate::instructions::inc_dec::execute_iny(self, opcode)?,
            "JMP" => crate::instructions::control::execute_jmp(self, opcode)?,
            "JSR" => crate::instructions::control::execute_jsr(self, opcode)?,
            "LDA" => crate::instructions::load_store::execute_lda(self, opcode)?,
            "LDX" => crate::instructions::load_store::execute_ldx(self, opcode)?,
            "LDY" => crate::instructions::load_store::execute_ldy(self, opcode)?,
            "LSR" => crate::instructions::shifts::execute_lsr(self, opcode)?,
            "NOP" => crate::instructions::control::execute_nop(self, opcode)?,
            "ORA" => crate::instructions::alu::execute_ora(self, opcode)?,
            "PHA" => crate::instructions::stack::execute_pha(self, opcode)?,
            "PHP" => crate::instructions::stack::execute_php(self, opcode)?,
            "PLA" => crate::instructions::stack::execute_pla(self, opcode)?,
            "PLP" => crate::instructions::stack::execute_plp(self, opcode)?,
            "ROL" => crate::instructions::shifts::execute_rol(self, opcode)?,
            "ROR" => crate::instructions::shifts::execute_ror(self, opcode)?,
            "RTI" => crate::instructions::control::execute_rti(self, opcode)?,
            "RTS" => crate::instructions::control::execute_rts(self, opcode)?,
            "SBC" => crate::instructions::alu::execute_sbc(self, opcode)?,
            "SEC" => crate::instructions::flags::execute_sec(self, opcode)?,
            "SED" => crate::instructions::flags::execute_sed(self, opcode)?,
            "SEI" => crate::instructions::flags::execute_sei(self, opcode)?,
            "STA" => crate::instructions::load_store::execute_sta(self, opcode)?,
            "STX" => crate::instructions::load_store::execute_stx(self, opcode)?,
            "STY" => crate::instructions::load_store::execute_sty(self, opcode)?,
            "TAX" => crate::instructions::transfer::execute_tax(self, opcode)?,
            "TAY" => crate::instructions::transfer::execute_tay(self, opcode)?,
            "TSX" => crate::instructions::transfer::execute_tsx(self, opcode)?,
            "TXA" => crate::instructions::transfer::execute_txa(self, opcode)?,
            "TXS" => crate::instructions::transfer::execute_txs(self, opcode)?,
            "TYA" => crate::instructions::transfer::execute_tya(self, opcode)?,
            _ => {
                // The legality check above covers the table; anything else
                // is a table defect.
                self.execution_status |= Self::FATAL_ERROR;
                return Err(ExecutionError::IllegalOpcode(opcode));
            }
        }

        self.instruction_count = self.instruction_count.wrapping_add(1);

        Ok(())
    }

    /// Services an interrupt through the given vector.
    ///
    /// Pushes PC high, PC low, and the status byte with B clear, sets the
    /// I flag, and loads the PC from the vector. Costs 7 cycles.
    fn interrupt(&mut self, vector: u16) {
        let pc = self.pc;
        self.push((pc >> 8) as u8);
        self.push((pc & 0xFF) as u8);

        // Hardware interrupts push the status byte with B = 0.
        let status = (self.status() | 0b0010_0000) & !0b0001_0000;
        self.push(status);

        self.flag_i = true;

        let pc_low = self.read(vector) as u16;
        let pc_high = self.read(vector.wrapping_add(1)) as u16;
        self.pc = (pc_high << 8) | pc_low;

        self.tick(7);
    }

    // ========== Bus Access Helpers ==========

    /// Reads a byte through the bus, recording the access direction.
    #[inline]
    pub(crate) fn read(&mut self, addr: u16) -> u8 {
        self.last_access_was_read = true;
        self.memory.read(addr)
    }

    /// Writes a byte through the bus, recording the access direction.
    #[inline]
    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.last_access_was_read = false;
        self.memory.write(addr, value);
    }

    /// Accounts for one instruction's worth of cycles, advancing both the
    /// CPU counter and bus-side time.
    #[inline]
    pub(crate) fn tick(&mut self, cycles: u64) {
        self.cycles += cycles;
        self.memory
            .increment_cycles(cycles as u32 * Self::SYSTEM_CYCLES_PER_PROCESSOR_CYCLE);
    }

    /// Pushes a byte onto the stack page.
    #[inline]
    pub(crate) fn push(&mut self, value: u8) {
        let stack_addr = 0x0100 | (self.sp as u16);
        self.write(stack_addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte from the stack page.
    #[inline]
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let stack_addr = 0x0100 | (self.sp as u16);
        self.read(stack_addr)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward
    /// from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the last opcode fetched (instruction register).
    pub fn ir(&self) -> u8 {
        self.ir
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b00100000; // Bit 5 always 1

        if self.flag_n {
            status |= 0b10000000;
        }
        if self.flag_v {
            status |= 0b01000000;
        }
        if self.flag_b {
            status |= 0b00010000;
        }
        if self.flag_d {
            status |= 0b00001000;
        }
        if self.flag_i {
            status |= 0b00000100;
        }
        if self.flag_z {
            status |= 0b00000010;
        }
        if self.flag_c {
            status |= 0b00000001;
        }

        status
    }

    /// Unpacks a status byte into the individual flags.
    ///
    /// Bit 5 is ignored; B follows bit 4 of the given value.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & 0b10000000 != 0;
        self.flag_v = value & 0b01000000 != 0;
        self.flag_b = value & 0b00010000 != 0;
        self.flag_d = value & 0b00001000 != 0;
        self.flag_i = value & 0b00000100 != 0;
        self.flag_z = value & 0b00000010 != 0;
        self.flag_c = value & 0b00000001 != 0;
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the total number of instructions executed.
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// Returns the raw execution-status condition bits.
    pub fn execution_status(&self) -> u8 {
        self.execution_status
    }

    /// Answers true iff the last bus access was a read.
    pub fn last_access_was_read(&self) -> bool {
        self.last_access_was_read
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters (for tests and state restore) ==========

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the instruction register value.
    pub fn set_ir(&mut self, value: u8) {
        self.ir = value;
    }

    /// Sets the cycle counter (state restore).
    pub fn set_cycles(&mut self, value: u64) {
        self.cycles = value;
    }

    /// Sets the instruction counter (state restore).
    pub fn set_instruction_count(&mut self, value: u64) {
        self.instruction_count = value;
    }

    /// Sets the raw execution-status bits (state restore).
    pub fn set_execution_status(&mut self, value: u8) {
        self.execution_status = value;
    }

    /// Sets the last-access-was-read marker (state restore).
    pub fn set_last_access_was_read(&mut self, value: bool) {
        self.last_access_was_read = value;
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// This allows tests and the owning machine to reach through to the bus.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6507::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.memory_mut().write(0x8000, 0xEA); // Write NOP instruction
    /// ```
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Helper Methods for Instruction Implementations ==========

    /// Gets the operand value for an instruction based on its addressing
    /// mode.
    ///
    /// Returns a tuple of (value, page_crossed) where page_crossed indicates
    /// whether a page boundary was crossed during address calculation
    /// (relevant for cycle-accurate emulation).
    pub(crate) fn get_operand_value(&mut self, mode: crate::AddressingMode) -> (u8, bool) {
        use crate::AddressingMode;

        match mode {
            AddressingMode::Immediate => {
                // Value is the byte immediately after the opcode
                let value = self.read(self.pc.wrapping_add(1));
                (value, false)
            }
            AddressingMode::Accumulator => (self.a, false),
            _ => {
                let (addr, page_crossed) = self.resolve_address(mode);
                let value = self.read(addr);
                (value, page_crossed)
            }
        }
    }

    /// Gets the effective address for an instruction based on its
    /// addressing mode.
    ///
    /// Used by stores and read-modify-write instructions; the page-crossed
    /// marker is ignored by those (their cycle cost is fixed).
    pub(crate) fn get_effective_address(&mut self, mode: crate::AddressingMode) -> u16 {
        self.resolve_address(mode).0
    }

    /// Computes the effective address and page-crossing marker for every
    /// memory addressing mode.
    fn resolve_address(&mut self, mode: crate::AddressingMode) -> (u16, bool) {
        use crate::AddressingMode;

        match mode {
            AddressingMode::ZeroPage => {
                // Address is in zero page (0x00XX)
                let addr = self.read(self.pc.wrapping_add(1)) as u16;
                (addr, false)
            }
            AddressingMode::ZeroPageX => {
                // Address is (zero page + X register) mod 256
                let base = self.read(self.pc.wrapping_add(1));
                (base.wrapping_add(self.x) as u16, false)
            }
            AddressingMode::ZeroPageY => {
                // Address is (zero page + Y register) mod 256
                let base = self.read(self.pc.wrapping_add(1));
                (base.wrapping_add(self.y) as u16, false)
            }
            AddressingMode::Absolute => {
                // Full 16-bit address
                let addr_lo = self.read(self.pc.wrapping_add(1)) as u16;
                let addr_hi = self.read(self.pc.wrapping_add(2)) as u16;
                ((addr_hi << 8) | addr_lo, false)
            }
            AddressingMode::AbsoluteX => {
                // 16-bit address + X register
                let addr_lo = self.read(self.pc.wrapping_add(1)) as u16;
                let addr_hi = self.read(self.pc.wrapping_add(2)) as u16;
                let base_addr = (addr_hi << 8) | addr_lo;
                let effective_addr = base_addr.wrapping_add(self.x as u16);

                // Page crossed iff the high byte changed
                let page_crossed = (base_addr & 0xFF00) != (effective_addr & 0xFF00);
                (effective_addr, page_crossed)
            }
            AddressingMode::AbsoluteY => {
                // 16-bit address + Y register
                let addr_lo = self.read(self.pc.wrapping_add(1)) as u16;
                let addr_hi = self.read(self.pc.wrapping_add(2)) as u16;
                let base_addr = (addr_hi << 8) | addr_lo;
                let effective_addr = base_addr.wrapping_add(self.y as u16);

                let page_crossed = (base_addr & 0xFF00) != (effective_addr & 0xFF00);
                (effective_addr, page_crossed)
            }
            AddressingMode::IndirectX => {
                // (Zero page + X), then dereference; pointer wraps within
                // zero page
                let base = self.read(self.pc.wrapping_add(1));
                let zp_addr = base.wrapping_add(self.x);

                let addr_lo = self.read(zp_addr as u16) as u16;
                let addr_hi = self.read(zp_addr.wrapping_add(1) as u16) as u16;
                ((addr_hi << 8) | addr_lo, false)
            }
            AddressingMode::IndirectY => {
                // Zero page dereference, then + Y
                let zp_addr = self.read(self.pc.wrapping_add(1));

                let addr_lo = self.read(zp_addr as u16) as u16;
                let addr_hi = self.read(zp_addr.wrapping_add(1) as u16) as u16;
                let base_addr = (addr_hi << 8) | addr_lo;
                let effective_addr = base_addr.wrapping_add(self.y as u16);

                let page_crossed = (base_addr & 0xFF00) != (effective_addr & 0xFF00);
                (effective_addr, page_crossed)
            }
            _ => {
                panic!("Addressing mode {:?} has no effective address", mode);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_at_8000() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = cpu_at_8000();

        // Verify initial state
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.instruction_count(), 0);
        assert_eq!(cpu.execution_status(), 0);

        // Verify status flags
        assert!(cpu.flag_i()); // Interrupt disable set on reset
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
    }

    #[test]
    fn test_status_register_packing() {
        let mut cpu = cpu_at_8000();

        let status = cpu.status();
        // Bit 5 always 1, I flag set (bit 2)
        assert_eq!(status & 0b00100000, 0b00100000);
        assert_eq!(status & 0b00000100, 0b00000100);

        // Roundtrip through the packed byte
        cpu.set_status(0b1110_1011);
        assert!(cpu.flag_n());
        assert!(cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(cpu.flag_d());
        assert!(!cpu.flag_i());
        assert!(cpu.flag_z());
        assert!(cpu.flag_c());
        assert_eq!(cpu.status(), 0b1110_1011);
    }

    #[test]
    fn test_step_illegal_opcode_is_fatal() {
        let mut cpu = cpu_at_8000();
        cpu.memory_mut().write(0x8000, 0x02); // Illegal/undocumented opcode

        match cpu.step() {
            Err(ExecutionError::IllegalOpcode(0x02)) => {
                // PC still addresses the offending byte
                assert_eq!(cpu.pc(), 0x8000);
                assert!(cpu.fatal_error());
            }
            _ => panic!("Expected IllegalOpcode error"),
        }
    }

    #[test]
    fn test_execute_counts_instructions() {
        let mut cpu = cpu_at_8000();
        for addr in 0x8000..0x8010 {
            cpu.memory_mut().write(addr, 0xEA); // NOP
        }

        assert!(cpu.execute(5));
        assert_eq!(cpu.instruction_count(), 5);
        assert_eq!(cpu.cycles(), 10); // NOP costs 2 cycles
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn test_stop_is_honored_between_instructions() {
        let mut cpu = cpu_at_8000();
        cpu.memory_mut().write(0x8000, 0xEA);

        cpu.stop();
        assert!(cpu.execute(100));
        // Nothing ran; the stop bit was consumed.
        assert_eq!(cpu.instruction_count(), 0);
        assert_eq!(cpu.execution_status(), 0);
    }

    #[test]
    fn test_reset_rereads_vector() {
        let mut cpu = cpu_at_8000();
        cpu.memory_mut().write(0xFFFC, 0x34);
        cpu.memory_mut().write(0xFFFD, 0x12);
        cpu.set_a(0x55);
        cpu.set_sp(0x10);

        cpu.reset();
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag_i());
    }

    #[test]
    fn test_bcd_tables() {
        assert_eq!(BCD_TABLE[0][0x42], 42);
        assert_eq!(BCD_TABLE[0][0x99], 99);
        assert_eq!(BCD_TABLE[1][42], 0x42);
        assert_eq!(BCD_TABLE[1][99], 0x99);
        assert_eq!(BCD_TABLE[1][0], 0x00);
    }
}
