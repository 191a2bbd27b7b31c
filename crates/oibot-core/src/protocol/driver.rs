//! Command facade
//!
//! Handles the driver lifecycle and turns commands and queries into
//! frames on a [`Transport`].
//!
//! Every physical write is followed by [`SERIAL_TRANSFER_DELAY`]; the
//! robot drops bytes that arrive faster than that. Exactly one request is
//! in flight at a time, and a response always belongs to the most recent
//! query. Share a driver across threads only behind a mutex held for the
//! whole call.

use std::time::{Duration, Instant};

use super::{
    actuators::{LedState, MotorState},
    frame::{Field, Frame, FrameBuilder},
    serial::SerialTransport,
    transport::{ReadPolicy, Transport},
    validate, Result, TransportError, BAUD_CHANGE_DELAY, SERIAL_TRANSFER_DELAY,
};
use crate::catalog::{sensors::OI_MODE, OpCode, SensorGroup, SensorPacket};
use crate::config::DriverConfig;
use crate::sensors::{
    decode::{self, Reading, SensorValue},
    status::{BatteryStatus, InfoStatus, OiMode, BATTERY_PACKETS, INFO_PACKETS},
};

/// Wait between reads while the link returns no bytes
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Open Interface driver owning one transport
pub struct Driver<T: Transport> {
    /// Link to the robot
    transport: T,
    /// What a failed read loop turns into
    policy: ReadPolicy,
    /// Current line speed
    baud_rate: u32,
    /// Set once the transport has been released
    closed: bool,
    /// Metrics: cumulative bytes/frames sent & bytes received
    tx_bytes: u64,
    rx_bytes: u64,
    tx_frames: u64,
}

impl Driver<SerialTransport> {
    /// Open the configured serial port and start the OI in Passive mode
    pub fn open(config: &DriverConfig) -> Result<Self> {
        config.validate()?;

        let transport =
            SerialTransport::open(&config.port_name, config.baud_rate, config.read_timeout())?;
        let mut driver = Driver::new(transport, config.baud_rate);

        if config.init_baud {
            driver.baud(config.baud_rate)?;
        }
        driver.passive()?;

        tracing::info!(
            port = %config.port_name,
            baud_rate = config.baud_rate,
            policy = ?driver.policy,
            "driver ready"
        );
        Ok(driver)
    }
}

impl<T: Transport> Driver<T> {
    /// Wrap an already-open transport. Nothing is sent.
    pub fn new(transport: T, baud_rate: u32) -> Self {
        let policy = ReadPolicy::for_timeout(transport.read_timeout());
        Self {
            transport,
            policy,
            baud_rate,
            closed: false,
            tx_bytes: 0,
            rx_bytes: 0,
            tx_frames: 0,
        }
    }

    /// Read failure policy derived from the transport's timeout
    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Current line speed
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Get cumulative tx bytes, rx bytes and tx frame counters
    pub fn get_counters(&self) -> (u64, u64, u64) {
        (self.tx_bytes, self.rx_bytes, self.tx_frames)
    }

    // ------------------------------------------------------------------
    // Framing
    // ------------------------------------------------------------------

    /// One physical write: all bytes or an error, then the settling delay
    fn send_all(&mut self, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(TransportError::Closed.into());
        }
        let written = self.transport.write(data)?;
        if written != data.len() {
            return Err(TransportError::ShortWrite {
                expected: data.len(),
                written,
            }
            .into());
        }
        self.tx_bytes += written as u64;
        std::thread::sleep(SERIAL_TRANSFER_DELAY);
        Ok(())
    }

    /// Transmit a bare opcode
    pub fn write_code(&mut self, opcode: OpCode) -> Result<()> {
        tracing::debug!("write {:?} ({})", opcode, opcode.byte());
        self.send_all(&[opcode.byte()])?;
        self.tx_frames += 1;
        Ok(())
    }

    /// Transmit a frame: opcode first, then the payload as a second write
    pub fn write(&mut self, frame: &Frame) -> Result<()> {
        self.write_code(frame.opcode)?;
        if !frame.payload.is_empty() {
            tracing::debug!("payload {:?}: {:02x?}", frame.opcode, frame.payload);
            self.send_all(&frame.payload)?;
        }
        Ok(())
    }

    /// Fill `buf` from a link that may return fewer bytes than asked
    fn read_exact_into(
        &mut self,
        buf: &mut [u8],
        deadline: Option<Instant>,
    ) -> std::result::Result<(), TransportError> {
        let idle_limit = self.transport.read_timeout();
        let mut filled = 0;
        let mut last_progress = Instant::now();

        while filled < buf.len() {
            let n = self.transport.read(&mut buf[filled..], deadline)?;
            if n == 0 {
                // An idle link on a bounded transport counts as a timeout
                let idle = idle_limit.is_some_and(|t| last_progress.elapsed() >= t);
                let expired = deadline.is_some_and(|d| Instant::now() >= d);
                if idle || expired {
                    return Err(TransportError::Timeout);
                }
                std::thread::sleep(IDLE_POLL_INTERVAL);
                continue;
            }
            filled += n;
            last_progress = Instant::now();
            tracing::trace!(read = n, filled, expected = buf.len(), "read chunk");
        }

        self.rx_bytes += filled as u64;
        Ok(())
    }

    /// Send a request and collect `expected` response bytes.
    ///
    /// Only the read loop is subject to the degrade policy; a failed
    /// request write is always an error. A caller deadline that expires
    /// also yields no data, whatever the policy. Input is discarded after
    /// a degraded read so a late reply is never taken for the next one.
    fn request(
        &mut self,
        frame: Frame,
        expected: usize,
        deadline: Option<Instant>,
    ) -> Result<Option<Vec<u8>>> {
        self.write(&frame)?;

        let mut data = vec![0u8; expected];
        match self.read_exact_into(&mut data, deadline) {
            Ok(()) => Ok(Some(data)),
            Err(e)
                if self.policy == ReadPolicy::Degrade
                    || (deadline.is_some() && matches!(e, TransportError::Timeout)) =>
            {
                tracing::warn!(opcode = ?frame.opcode, error = %e, "query returned no data");
                if let Err(flush_err) = self.transport.flush() {
                    tracing::warn!(error = %flush_err, "failed to discard stale input");
                }
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Query a packet or group id for its raw bytes. `None` means no data.
    pub fn query(&mut self, id: u8) -> Result<Option<Vec<u8>>> {
        self.query_until(id, None)
    }

    /// Like [`Driver::query`], giving up with no data once `deadline` passes
    pub fn query_until(&mut self, id: u8, deadline: Option<Instant>) -> Result<Option<Vec<u8>>> {
        let expected = validate::query(id)?;
        let frame = FrameBuilder::new(OpCode::Query).byte(id).build();
        self.request(frame, expected, deadline)
    }

    /// Raw bytes of one sensor packet
    pub fn sensor(&mut self, packet: &SensorPacket) -> Result<Option<Vec<u8>>> {
        validate::packet(packet)?;
        let frame = FrameBuilder::new(OpCode::Query).byte(packet.id).build();
        self.request(frame, packet.bytes(), None)
    }

    /// Decoded value of one sensor packet
    pub fn sensor_value(&mut self, packet: &SensorPacket) -> Result<Option<SensorValue>> {
        match self.sensor(packet)? {
            Some(bytes) => Ok(Some(decode::decode_value(packet, &bytes)?)),
            None => Ok(None),
        }
    }

    fn query_list_raw(&mut self, packets: &[SensorPacket]) -> Result<Option<Vec<u8>>> {
        for packet in packets {
            validate::packet(packet)?;
        }
        let ids: Vec<u8> = packets.iter().map(|p| p.id).collect();
        let expected = validate::query_list(&ids)?;
        let frame = FrameBuilder::new(OpCode::QueryList)
            .byte(ids.len() as u8)
            .bytes(&ids)
            .build();
        self.request(frame, expected, None)
    }

    /// Raw bytes of several packets, one slot per packet in request order
    pub fn sensor_list(&mut self, packets: &[SensorPacket]) -> Result<Option<Vec<Vec<u8>>>> {
        match self.query_list_raw(packets)? {
            Some(bytes) => Ok(Some(
                decode::split_list(packets, &bytes)?
                    .into_iter()
                    .map(<[u8]>::to_vec)
                    .collect(),
            )),
            None => Ok(None),
        }
    }

    /// Decoded values of several packets in request order
    pub fn sensor_values(&mut self, packets: &[SensorPacket]) -> Result<Option<Vec<SensorValue>>> {
        match self.query_list_raw(packets)? {
            Some(bytes) => Ok(Some(decode::decode_list(packets, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Every member of a sensor group, decoded
    pub fn sensor_group(&mut self, group: &SensorGroup) -> Result<Option<Vec<Reading>>> {
        validate::group(group)?;
        let frame = FrameBuilder::new(OpCode::Query).byte(group.id).build();
        match self.request(frame, group.size, None)? {
            Some(bytes) => Ok(Some(decode::decode_group(group, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Current OI mode, always read from the robot
    pub fn mode(&mut self) -> Result<Option<OiMode>> {
        match self.sensor(&OI_MODE)? {
            Some(bytes) => Ok(Some(OiMode::try_from(bytes[0])?)),
            None => Ok(None),
        }
    }

    /// Battery and charger status
    pub fn battery(&mut self) -> Result<Option<BatteryStatus>> {
        match self.query_list_raw(&BATTERY_PACKETS)? {
            Some(bytes) => Ok(Some(BatteryStatus::from_response(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Mode and battery in a single request
    pub fn info(&mut self) -> Result<Option<InfoStatus>> {
        match self.query_list_raw(&INFO_PACKETS)? {
            Some(bytes) => Ok(Some(InfoStatus::from_response(&bytes)?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Mode commands
    // ------------------------------------------------------------------

    /// Start the OI; the robot enters Passive mode
    pub fn start(&mut self) -> Result<()> {
        self.write_code(OpCode::Start)
    }

    /// Alias for [`Driver::start`]
    pub fn passive(&mut self) -> Result<()> {
        self.start()
    }

    /// Soft reset
    pub fn reset(&mut self) -> Result<()> {
        self.write_code(OpCode::Reset)
    }

    /// Stop the OI, halting streaming and motion
    pub fn stop(&mut self) -> Result<()> {
        self.write_code(OpCode::Stop)
    }

    /// Legacy equivalent of Safe
    pub fn control(&mut self) -> Result<()> {
        self.write_code(OpCode::Control)
    }

    /// Request Safe mode. Confirm with [`Driver::mode`].
    pub fn safe(&mut self) -> Result<()> {
        self.write_code(OpCode::Safe)
    }

    /// Request Full mode. Confirm with [`Driver::mode`].
    pub fn full(&mut self) -> Result<()> {
        self.write_code(OpCode::Full)
    }

    /// Power down
    pub fn power(&mut self) -> Result<()> {
        self.write_code(OpCode::Power)
    }

    /// Change the robot's baud rate, then retune the local port to match
    pub fn baud(&mut self, rate: u32) -> Result<()> {
        let code = validate::baud(rate)?;
        self.write(&FrameBuilder::new(OpCode::Baud).byte(code).build())?;

        std::thread::sleep(BAUD_CHANGE_DELAY);
        self.transport.set_baud_rate(rate)?;
        self.baud_rate = rate;

        tracing::info!(baud_rate = rate, code, "baud rate changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cleaning commands
    // ------------------------------------------------------------------

    /// Default cleaning cycle
    pub fn clean(&mut self) -> Result<()> {
        self.write_code(OpCode::Clean)
    }

    /// Max cleaning cycle
    pub fn max_clean(&mut self) -> Result<()> {
        self.write_code(OpCode::MaxClean)
    }

    /// Spot cleaning cycle
    pub fn spot(&mut self) -> Result<()> {
        self.write_code(OpCode::Spot)
    }

    /// Return to the dock
    pub fn seek_dock(&mut self) -> Result<()> {
        self.write_code(OpCode::ForceSeekingDock)
    }

    // ------------------------------------------------------------------
    // Actuators
    // ------------------------------------------------------------------

    /// Drive at `velocity` mm/s along an arc of `radius` mm
    pub fn drive(&mut self, velocity: i16, radius: i16) -> Result<()> {
        validate::drive(velocity, radius)?;
        self.write(&Frame::with_fields(
            OpCode::Drive,
            &[Field::I16(velocity), Field::I16(radius)],
        ))
    }

    /// Drive without turning
    pub fn drive_straight(&mut self, velocity: i16) -> Result<()> {
        self.drive(velocity, validate::DRIVE_STRAIGHT_RADIUS)
    }

    /// Halt the wheels
    pub fn drive_stop(&mut self) -> Result<()> {
        self.drive(0, 0)
    }

    /// Set each wheel's velocity in mm/s
    pub fn drive_wheels(&mut self, right: i16, left: i16) -> Result<()> {
        validate::drive_wheels(right, left)?;
        self.write(&Frame::with_fields(
            OpCode::DriveWheels,
            &[Field::I16(right), Field::I16(left)],
        ))
    }

    /// Set each wheel's PWM duty cycle
    pub fn drive_pwm(&mut self, right: i16, left: i16) -> Result<()> {
        validate::drive_pwm(right, left)?;
        self.write(&Frame::with_fields(
            OpCode::DrivePwm,
            &[Field::I16(right), Field::I16(left)],
        ))
    }

    /// Switch the cleaning motors
    pub fn motors(&mut self, state: MotorState) -> Result<()> {
        self.write(&FrameBuilder::new(OpCode::Motors).byte(state.to_byte()).build())
    }

    /// Set cleaning motor duty cycles
    pub fn pwm_motors(&mut self, main_brush: i8, side_brush: i8, vacuum: i8) -> Result<()> {
        validate::pwm_motors(main_brush, side_brush, vacuum)?;
        self.write(&Frame::with_fields(
            OpCode::PwmMotors,
            &[Field::I8(main_brush), Field::I8(side_brush), Field::I8(vacuum)],
        ))
    }

    /// Set indicator LEDs and the power button color
    pub fn leds(&mut self, state: LedState) -> Result<()> {
        self.write(&FrameBuilder::new(OpCode::Leds).bytes(&state.to_bytes()).build())
    }

    /// Store a song of `(note, duration)` pairs; durations are in 1/64 s
    pub fn song(&mut self, number: u8, notes: &[(u8, u8)]) -> Result<()> {
        validate::song(number, notes)?;
        let mut builder = FrameBuilder::new(OpCode::Song)
            .byte(number)
            .byte(notes.len() as u8);
        for &(note, duration) in notes {
            builder = builder.byte(note).byte(duration);
        }
        self.write(&builder.build())
    }

    /// Play a stored song
    pub fn play(&mut self, number: u8) -> Result<()> {
        validate::song_number(number)?;
        self.write(&FrameBuilder::new(OpCode::Play).byte(number).build())
    }

    /// Show four ASCII characters on the digit LEDs, left to right
    pub fn digit_leds_ascii(&mut self, chars: [u8; 4]) -> Result<()> {
        validate::digit_leds_ascii(&chars)?;
        self.write(&FrameBuilder::new(OpCode::DigitLedsAscii).bytes(&chars).build())
    }

    /// Simulate button presses (bit field, released automatically)
    pub fn buttons(&mut self, buttons: u8) -> Result<()> {
        self.write(&FrameBuilder::new(OpCode::Buttons).byte(buttons).build())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Discard anything buffered on the link
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.transport.flush()?)
    }

    /// Release the transport
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.transport.close()?;
        tracing::info!(
            tx_bytes = self.tx_bytes,
            rx_bytes = self.rx_bytes,
            "driver closed"
        );
        Ok(())
    }
}

impl<T: Transport> Drop for Driver<T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::error!(error = %e, "failed to close transport");
        }
    }
}
